//! Provider trait definition

use async_trait::async_trait;

use super::error::ProviderResult;
use crate::types::{ChatMessage, Choice, Tool, ToolChoice};

/// Model configuration for provider requests
#[derive(Debug, Clone)]
pub struct ProviderModelConfig {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
}

impl ProviderModelConfig {
    /// Create a new model config
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: None,
            api_base: None,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }
}

/// Options for a completion request
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Tools the model may call; `None` means the request carries no tools
    pub tools: Option<Vec<Tool>>,
    /// Tool choice behavior
    pub tool_choice: Option<ToolChoice>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach tools; an empty list leaves the request tool-free
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }
}

/// Provider trait for completion backends
///
/// A call is stateless: the full transcript goes in, every returned choice
/// comes out in the order the backend produced them.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Get the default API base URL
    fn default_api_base(&self) -> &str;

    /// Run one completion over `messages`
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &ProviderModelConfig,
        options: ChatOptions,
    ) -> ProviderResult<Vec<Choice>>;

    /// Get the API base URL, using custom if provided
    fn get_api_base(&self, model: &ProviderModelConfig) -> String {
        model
            .api_base
            .clone()
            .unwrap_or_else(|| self.default_api_base().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tools_are_omitted() {
        let options = ChatOptions::new().with_tools(Vec::new());
        assert!(options.tools.is_none());

        let options = ChatOptions::new().with_tools(vec![Tool::new("ping", "")]);
        assert_eq!(options.tools.map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_model_config_builder() {
        let config = ProviderModelConfig::new("gpt-4o")
            .with_api_key("sk")
            .with_api_base("http://localhost:1234/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_key.as_deref(), Some("sk"));
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:1234/v1"));
    }
}
