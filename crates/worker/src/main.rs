use mapant_core::config::WorkerConfig;
use mapant_worker::dispatch::Dispatcher;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapant_worker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match WorkerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Invalid worker configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        worker_id = %config.credentials.worker_id,
        base_url = %config.base_url,
        "Starting mapant-worker",
    );

    Dispatcher::new(&config).run().await;

    tracing::info!("Worker stopped");
}
