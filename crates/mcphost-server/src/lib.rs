//! mcphost WebSocket server
//!
//! Serves `/ws`: every binary (or text) frame is a protobuf chat message,
//! answered with one assistant frame once the query completes.

pub mod codec;
pub mod config;
pub mod error;
pub mod session;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use mcphost_core::mcp::{connect_all, McpClient};
use mcphost_core::{ChatClient, Logger, McpConfigFile};

pub use codec::{decode_frame, encode_reply, ChatFrame, CodecError};
pub use config::{Cli, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use session::{ws_handler, ChatSession};

/// Router with the chat endpoint
pub fn router(client: Arc<ChatClient>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(client)
}

/// Load the tool-server file and connect every entry
///
/// Nothing here is fatal: file and connection errors are logged and the
/// server runs with whatever connected.
pub async fn connect_providers(
    path: Option<&Path>,
    connect_timeout: Duration,
    logger: Arc<dyn Logger>,
) -> Vec<Arc<McpClient>> {
    let Some(path) = path else {
        tracing::info!("no tool-server configuration found, running without tools");
        return Vec::new();
    };

    let config = match McpConfigFile::load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "failed to load tool-server configuration"
            );
            return Vec::new();
        }
    };

    let (clients, errors) = connect_all(&config, logger, connect_timeout).await;
    for e in &errors {
        tracing::error!(error = %e, "tool server unavailable");
    }
    tracing::info!(
        connected = clients.len(),
        failed = errors.len(),
        "tool servers initialized"
    );
    clients
}
