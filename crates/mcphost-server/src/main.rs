use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcphost_core::mcp::{close_all, ToolProvider};
use mcphost_core::{ChatClient, Logger, TracingLogger};
use mcphost_server::{connect_providers, router, Cli, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e);
        }
    };

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger::new());
    let clients = connect_providers(
        config.mcp_config.as_deref(),
        config.connect_timeout,
        Arc::clone(&logger),
    )
    .await;

    let providers = clients
        .iter()
        .map(|c| Arc::clone(c) as Arc<dyn ToolProvider>)
        .collect();
    let chat = ChatClient::from_settings(&config.completion, Arc::clone(&logger))
        .with_providers(providers)
        .with_query_timeout(config.query_timeout);

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("mcphost listening on ws://{}/ws", config.listen);

    axum::serve(listener, router(Arc::new(chat)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down, closing tool servers");
    close_all(&clients, logger.as_ref()).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
