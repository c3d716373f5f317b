//! Mock provider for testing
//!
//! Provides deterministic, configurable completions without network
//! dependencies, and records every request it receives.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatOptions, Provider, ProviderModelConfig};
use crate::logging::Logger;
use crate::types::{ChatMessage, Choice, MessageRole, Tool};

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user message
    #[default]
    Echo,
    /// Return the same choices on every call
    Fixed(Vec<Choice>),
    /// Pop one response per call; an exhausted script is an error
    Script(VecDeque<Vec<Choice>>),
    /// Fail every call
    Error(String),
}

/// One request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub tools: Option<Vec<Tool>>,
}

/// Mock completion provider for testing
pub struct MockProvider {
    mode: Mutex<MockMode>,
    requests: Mutex<Vec<RecordedRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    /// Create a mock with a specific mode
    pub fn with_mode(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode: Mutex::new(mode),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create an echo provider (echoes back user message)
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Echo, logger)
    }

    /// Create a provider answering every call with one text choice
    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(vec![Choice::text(response)]), logger)
    }

    /// Create a provider that replays `responses` in order
    pub fn scripted(responses: Vec<Vec<Choice>>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Script(responses.into()), logger)
    }

    /// Create an error-producing provider
    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Error(message.into()), logger)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn last_user_message(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User && !m.content.is_empty())
            .map(|m| m.content.clone())
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_api_base(&self) -> &str {
        "http://localhost:0/mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &ProviderModelConfig,
        options: ChatOptions,
    ) -> ProviderResult<Vec<Choice>> {
        self.requests.lock().push(RecordedRequest {
            messages: messages.to_vec(),
            model: model.model.clone(),
            tools: options.tools,
        });

        let mut mode = self.mode.lock();
        match &mut *mode {
            MockMode::Echo => {
                let user_msg = Self::last_user_message(messages);
                self.logger
                    .debug(&format!("MockProvider: Echo mode, echoing: {}", user_msg));
                Ok(vec![Choice::text(format!("Echo: {}", user_msg))])
            }
            MockMode::Fixed(choices) => Ok(choices.clone()),
            MockMode::Script(queue) => {
                let next = queue.pop_front();
                self.logger.debug(&format!(
                    "MockProvider: Script mode, {} response(s) left",
                    queue.len()
                ));
                next.ok_or_else(|| ProviderError::Other("Mock script exhausted".to_string()))
            }
            MockMode::Error(message) => {
                Err(ProviderError::Other(format!("Mock error: {}", message)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ToolCall;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn test_config() -> ProviderModelConfig {
        ProviderModelConfig::new("mock-model")
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let provider = MockProvider::echo(test_logger());
        let choices = provider
            .complete(&[ChatMessage::user("Hello, world!")], &test_config(), ChatOptions::new())
            .await
            .unwrap();

        assert_eq!(choices, vec![Choice::text("Echo: Hello, world!")]);
    }

    #[tokio::test]
    async fn test_script_mode_replays_then_fails() {
        let provider = MockProvider::scripted(
            vec![
                vec![Choice::tool_calls(vec![ToolCall::new("c1", "X", "{}")])],
                vec![Choice::text("done")],
            ],
            test_logger(),
        );
        let messages = [ChatMessage::user("go")];

        let first = provider.complete(&messages, &test_config(), ChatOptions::new()).await.unwrap();
        assert!(first[0].has_tool_calls());

        let second = provider
            .complete(&messages, &test_config(), ChatOptions::new())
            .await
            .unwrap();
        assert_eq!(second[0].content, "done");

        assert!(provider.complete(&messages, &test_config(), ChatOptions::new()).await.is_err());
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let provider = MockProvider::fixed("ok", test_logger());
        provider
            .complete(
                &[ChatMessage::user("a")],
                &test_config(),
                ChatOptions::new().with_tools(vec![Tool::new("ping", "")]),
            )
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "mock-model");
        assert_eq!(requests[0].messages, vec![ChatMessage::user("a")]);
        assert_eq!(requests[0].tools.as_ref().map(|t| t.len()), Some(1));
    }

    #[tokio::test]
    async fn test_error_mode() {
        let provider = MockProvider::error("Test error message", test_logger());
        let err = provider
            .complete(&[ChatMessage::user("x")], &test_config(), ChatOptions::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Test error message"));
    }
}
