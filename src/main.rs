mod server;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler::network_status,
    service::{notification::webhook::WebhookSink, probe::MinecraftProbe},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let directory_db = startup::connect_to_directory(&config).await?;

    if config.status_webhook_url.is_none() {
        tracing::warn!("NETWORK_STATUS_WEBHOOK_URL is not set, status summaries will be dropped");
    }
    if config.log_webhook_url.is_none() {
        tracing::warn!("NETWORK_LOG_WEBHOOK_URL is not set, status alerts will be dropped");
    }
    let sink = WebhookSink::new(
        config.status_webhook_url.clone(),
        config.log_webhook_url.clone(),
    );

    let state = AppState::new(
        db,
        directory_db,
        Arc::new(MinecraftProbe),
        Arc::new(sink),
        config.monitor,
    );

    tracing::info!("Starting network status monitor");

    let mut scheduler = network_status::start_scheduler(state).await?;

    tokio::signal::ctrl_c().await.map_err(|e| {
        AppError::InternalError(format!("Failed to listen for shutdown signal: {}", e))
    })?;

    tracing::info!("Shutting down network status monitor");
    scheduler.shutdown().await?;

    Ok(())
}
