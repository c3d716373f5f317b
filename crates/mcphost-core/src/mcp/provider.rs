//! Tool-provider abstraction

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::McpResult;
use crate::types::Tool;

/// Text returned by a provider for one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: String,
    /// The tool ran but reported failure; the text is still meant for the model
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A connected source of callable tools
///
/// Implemented by [`McpClient`](super::McpClient) for real servers and by
/// [`StaticToolProvider`](super::StaticToolProvider) for tests.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Provider name, used in logs
    fn name(&self) -> &str;

    /// Tools currently exposed by the provider
    async fn list_tools(&self) -> McpResult<Vec<Tool>>;

    /// Invoke `name` with decoded arguments
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput>;
}
