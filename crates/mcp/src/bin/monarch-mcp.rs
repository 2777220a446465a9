use anyhow::Result;
use monarch_mcp::{tools, McpServer, ServerConfig, SessionManager};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Stdout carries the protocol; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_env()?;
    let session = Arc::new(SessionManager::new(config));

    let registry = tools::default_registry(session);
    info!(tools = registry.len(), "registered tools");

    let server = McpServer::new(registry);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "monarch-mcp listening on stdio"
    );
    server.run().await
}
