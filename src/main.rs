use anyhow::Result;
use relaycast::config::AppConfig;
use relaycast::server;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load();

    let level: tracing::Level = config
        .logging
        .level
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    tracing::info!("[SERVER] upstream = {}", config.upstream.base_url);
    server::run(config).await
}
