use anyhow::Result;
use tracing_subscriber::EnvFilter;
use yamdb::config::{AppConfig, CONFIG_PATH_ENV};
use yamdb::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());
    let config = AppConfig::load(path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(path) = &path {
        tracing::info!(%path, "Configuration loaded");
    }

    ServerBuilder::new()
        .with_config(config)
        .register_defaults()
        .serve()
        .await
}
