use tracing::info;
use tracing_subscriber::EnvFilter;
use ytmusic_mcp::{config::Config, mcp::McpToolServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: {:?}", config);

    McpToolServer::from_config(&config).serve_stdio().await?;

    info!("Shutting down");
    Ok(())
}
