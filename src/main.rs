use anyhow::Context;
use product_rest::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting product server...");

    let config = ServerConfig::load(&ConfigService::from_env())?;

    let container = app::build_container(Arc::new(TracingDiagnostics))?;
    let router = app::build_router(&container)?;

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    app::serve(listener, router, async {
        shutdown_signal().await;
        tracing::info!("Initiating graceful shutdown...");
    })
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
