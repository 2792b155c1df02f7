use anyhow::Context;
use shelfprice::engine::QLearningParams;
use shelfprice::{api, config::Config, CsvDataSource, DiscountPolicy, ProductDataSource};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("Server error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let policy = load_policy(&config).await?;
    let port = config.port;

    let app = api::create_router(api::AppState::new(config, policy));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}

/// Train the recommender when a dataset is configured. Training is CPU bound,
/// so it runs on the blocking pool.
async fn load_policy(config: &Config) -> anyhow::Result<Option<DiscountPolicy>> {
    let Some(path) = config.pricing_dataset_path.clone() else {
        tracing::info!("PRICING_DATASET_PATH not set; recommender disabled");
        return Ok(None);
    };

    let params = QLearningParams {
        episodes: config.qlearn_episodes,
        seed: config.qlearn_seed,
        ..QLearningParams::default()
    };

    let policy = tokio::task::spawn_blocking(move || -> anyhow::Result<DiscountPolicy> {
        let source = CsvDataSource::new(path);
        let records = source
            .load_products()
            .with_context(|| format!("failed to load dataset {}", source.path().display()))?;
        tracing::info!(
            rows = records.len(),
            path = %source.path().display(),
            "training discount recommender"
        );
        let policy = DiscountPolicy::train(&records, params)?;
        tracing::info!(products = policy.product_count(), "discount recommender ready");
        Ok(policy)
    })
    .await
    .context("recommender training task panicked")??;

    Ok(Some(policy))
}
