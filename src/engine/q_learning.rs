//! Tabular Q-learning over a product dataset.
//!
//! Each dataset row is a state; each entry of [`DISCOUNT_ACTIONS`] is an
//! action. Training walks the rows in order for a fixed number of episodes,
//! choosing discounts epsilon-greedily, and the trained table recommends the
//! best-valued discount per product.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::info;

use crate::domain::ProductRecord;

use super::PricingError;

pub const ACTION_COUNT: usize = 7;

/// Discount options in percent.
pub const DISCOUNT_ACTIONS: [u32; ACTION_COUNT] = [0, 5, 10, 15, 20, 25, 30];

/// Shelf life (days) against which `days_to_expiry` is normalized in the reward.
const REWARD_HORIZON_DAYS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct QLearningParams {
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor for future value.
    pub gamma: f64,
    /// Exploration rate.
    pub epsilon: f64,
    pub episodes: usize,
    pub seed: u64,
}

impl Default for QLearningParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            episodes: 1000,
            seed: 42,
        }
    }
}

/// Q-table with an epsilon-greedy policy.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: Vec<[f64; ACTION_COUNT]>,
    params: QLearningParams,
    rng: StdRng,
}

impl QLearningAgent {
    pub fn new(state_size: usize, params: QLearningParams) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self {
            q_table: vec![[0.0; ACTION_COUNT]; state_size],
            params,
            rng,
        }
    }

    pub fn q_values(&self, state: usize) -> &[f64] {
        &self.q_table[state]
    }

    /// Explore with probability epsilon, otherwise exploit.
    pub fn choose_action(&mut self, state: usize) -> usize {
        if self.rng.gen::<f64>() < self.params.epsilon {
            self.rng.gen_range(0..ACTION_COUNT)
        } else {
            self.best_action(state)
        }
    }

    /// Highest-valued action; the lowest index wins ties.
    pub fn best_action(&self, state: usize) -> usize {
        argmax(&self.q_table[state])
    }

    pub fn update(&mut self, state: usize, action: usize, reward: f64, next_state: usize) {
        let best_next = self.q_table[next_state][self.best_action(next_state)];
        let current = self.q_table[state][action];
        self.q_table[state][action] +=
            self.params.alpha * (reward + self.params.gamma * best_next - current);
    }
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Reward for offering `discount` percent on a product row: sales uplift
/// against how close the product is to expiry.
pub fn reward(record: &ProductRecord, discount: u32) -> f64 {
    let new_sales = record.daily_sales * (1.0 + discount as f64 / 100.0);
    let expiry_factor = 1.0 - record.days_to_expiry / REWARD_HORIZON_DAYS;
    (new_sales / record.daily_sales) * 10.0 - expiry_factor * 5.0
}

/// A trained discount table keyed by product id.
#[derive(Debug, Clone)]
pub struct DiscountPolicy {
    agent: QLearningAgent,
    index: HashMap<String, usize>,
}

impl DiscountPolicy {
    /// Train a policy over the dataset rows.
    ///
    /// # Errors
    /// Rejects an empty dataset and rows whose `daily_sales` is not positive
    /// (the reward divides by it).
    pub fn train(records: &[ProductRecord], params: QLearningParams) -> Result<Self, PricingError> {
        if records.is_empty() {
            return Err(PricingError::validation("dataset", "no product rows"));
        }
        for record in records {
            if !(record.daily_sales.is_finite() && record.daily_sales > 0.0) {
                return Err(PricingError::validation(
                    "daily_sales",
                    format!("must be > 0 for product {}", record.product_id),
                ));
            }
            if !record.days_to_expiry.is_finite() {
                return Err(PricingError::validation(
                    "days_to_expiry",
                    format!("must be finite for product {}", record.product_id),
                ));
            }
        }

        let episodes = params.episodes;
        let num_states = records.len();
        let mut agent = QLearningAgent::new(num_states, params);

        for _ in 0..episodes {
            for (state, record) in records.iter().enumerate() {
                let action = agent.choose_action(state);
                let r = reward(record, DISCOUNT_ACTIONS[action]);
                let next_state = (state + 1).min(num_states - 1);
                agent.update(state, action, r, next_state);
            }
        }

        let mut index = HashMap::with_capacity(num_states);
        for (state, record) in records.iter().enumerate() {
            // first occurrence of a product id owns its row
            index.entry(record.product_id.clone()).or_insert(state);
        }

        info!(products = index.len(), episodes, "discount policy trained");

        Ok(Self { agent, index })
    }

    /// Recommended discount in percent, or `None` for an unknown product.
    pub fn recommend(&self, product_id: &str) -> Option<u32> {
        self.index
            .get(product_id)
            .map(|&state| DISCOUNT_ACTIONS[self.agent.best_action(state)])
    }

    pub fn product_count(&self) -> usize {
        self.index.len()
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }
}
