//! Tool-provider errors

use thiserror::Error;

use crate::config::ConfigError;

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error attributed to one configured server
    #[error("server '{server}': {source}")]
    Server {
        server: String,
        source: Box<McpError>,
    },
}

impl McpError {
    /// Attach the configured server name
    pub fn for_server(self, server: impl Into<String>) -> Self {
        Self::Server {
            server: server.into(),
            source: Box::new(self),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;
