//! In-memory tool provider for tests and demos

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::error::{McpError, McpResult};
use super::provider::{ToolOutput, ToolProvider};
use crate::types::Tool;

/// Scripted outcome of calling one tool
#[derive(Debug, Clone)]
pub enum StaticOutcome {
    /// Successful text result
    Text(String),
    /// The tool ran and reported an error
    ToolError(String),
    /// The call itself fails
    Fail(String),
}

/// A tool provider whose tools and results are fixed up front
///
/// Every call is recorded so tests can check which arguments reached it.
#[derive(Debug, Default)]
pub struct StaticToolProvider {
    name: String,
    tools: Vec<Tool>,
    outcomes: HashMap<String, StaticOutcome>,
    delays: HashMap<String, Duration>,
    fail_listing: bool,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl StaticToolProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Register a tool returning `text`
    pub fn with_text_tool(self, name: &str, text: impl Into<String>) -> Self {
        self.with_tool(Tool::new(name, ""), StaticOutcome::Text(text.into()))
    }

    pub fn with_tool(mut self, tool: Tool, outcome: StaticOutcome) -> Self {
        self.outcomes.insert(tool.name.clone(), outcome);
        self.tools.push(tool);
        self
    }

    /// Delay every call to `tool`
    pub fn with_delay(mut self, tool: &str, delay: Duration) -> Self {
        self.delays.insert(tool.to_string(), delay);
        self
    }

    /// Make `list_tools` fail
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Calls received so far, in arrival order
    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolProvider for StaticToolProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        if self.fail_listing {
            return Err(McpError::Protocol(format!("{} refused to list tools", self.name)));
        }
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput> {
        self.calls.lock().push((name.to_string(), arguments));

        if let Some(delay) = self.delays.get(name) {
            tokio::time::sleep(*delay).await;
        }

        match self.outcomes.get(name) {
            Some(StaticOutcome::Text(text)) => Ok(ToolOutput::text(text.clone())),
            Some(StaticOutcome::ToolError(text)) => Ok(ToolOutput::error(text.clone())),
            Some(StaticOutcome::Fail(reason)) => Err(McpError::ToolCallFailed(reason.clone())),
            None => Err(McpError::UnknownTool(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_outcomes() {
        let provider = StaticToolProvider::new("stub")
            .with_text_tool("ok", "fine")
            .with_tool(Tool::new("bad", ""), StaticOutcome::ToolError("nope".into()))
            .with_tool(Tool::new("broken", ""), StaticOutcome::Fail("down".into()));

        assert_eq!(provider.list_tools().await.unwrap().len(), 3);
        assert_eq!(provider.call_tool("ok", Map::new()).await.unwrap(), ToolOutput::text("fine"));
        assert!(provider.call_tool("bad", Map::new()).await.unwrap().is_error);
        assert!(provider.call_tool("broken", Map::new()).await.is_err());
        assert!(matches!(
            provider.call_tool("missing", Map::new()).await,
            Err(McpError::UnknownTool(_))
        ));
        assert_eq!(provider.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_failing_listing() {
        let provider = StaticToolProvider::new("stub").failing_listing();
        assert!(provider.list_tools().await.is_err());
    }
}
