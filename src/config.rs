use std::collections::HashMap;
use thiserror::Error;

use crate::domain::EngineKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub discount_engine: EngineKind,
    pub pricing_dataset_path: Option<String>,
    pub qlearn_episodes: usize,
    pub qlearn_seed: u64,
    pub nfc_max_payload_bytes: usize,
    /// Open inventory lines held in memory at once.
    pub inventory_max_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            discount_engine: EngineKind::Gompertz,
            pricing_dataset_path: None,
            qlearn_episodes: 1000,
            qlearn_seed: 42,
            nfc_max_payload_bytes: 4096,
            inventory_max_lines: 10_000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let port = parse_or(&env_map, "PORT", defaults.port, "must be a valid u16")?;

        let discount_engine = match env_map
            .get("DISCOUNT_ENGINE")
            .map(|s| s.as_str())
            .unwrap_or("gompertz")
        {
            "fixed_rule" => EngineKind::FixedRule,
            "gompertz" => EngineKind::Gompertz,
            other => {
                return Err(ConfigError::InvalidValue(
                    "DISCOUNT_ENGINE".to_string(),
                    format!("must be fixed_rule or gompertz, got {}", other),
                ))
            }
        };

        let pricing_dataset_path = env_map
            .get("PRICING_DATASET_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let qlearn_episodes = parse_or(
            &env_map,
            "QLEARN_EPISODES",
            defaults.qlearn_episodes,
            "must be a valid usize",
        )?;
        if qlearn_episodes == 0 {
            return Err(ConfigError::InvalidValue(
                "QLEARN_EPISODES".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let qlearn_seed = parse_or(
            &env_map,
            "QLEARN_SEED",
            defaults.qlearn_seed,
            "must be a valid u64",
        )?;

        let nfc_max_payload_bytes = parse_or(
            &env_map,
            "NFC_MAX_PAYLOAD_BYTES",
            defaults.nfc_max_payload_bytes,
            "must be a valid usize",
        )?;
        if nfc_max_payload_bytes == 0 {
            return Err(ConfigError::InvalidValue(
                "NFC_MAX_PAYLOAD_BYTES".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let inventory_max_lines = parse_or(
            &env_map,
            "INVENTORY_MAX_LINES",
            defaults.inventory_max_lines,
            "must be a valid usize",
        )?;
        if inventory_max_lines == 0 {
            return Err(ConfigError::InvalidValue(
                "INVENTORY_MAX_LINES".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Config {
            port,
            discount_engine,
            pricing_dataset_path,
            qlearn_episodes,
            qlearn_seed,
            nfc_max_payload_bytes,
            inventory_max_lines,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
    expectation: &str,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string(), expectation.to_string())),
    }
}
