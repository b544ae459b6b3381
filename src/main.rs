use anyhow::Context;
use tracing::info;

mod api;
mod config;
mod error;
mod server;

pub use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiro_ai_service=info,tower_http=warn".into()),
        )
        .init();

    // Load config from the environment; invalid values are fatal here,
    // before any port is opened.
    let config = Config::from_env().context("invalid configuration")?;

    info!(
        host = %config.host,
        port = config.port,
        service = %config.service_name,
        allowed_origins = config.allowed_origins.len(),
        "kiro-ai-service starting"
    );

    server::run(config).await
}
