//! The tool-call orchestration loop

use std::sync::Arc;
use std::time::Duration;

use super::assembler::ResponseAssembler;
use super::error::{ChatError, ChatResult};
use super::state::ConversationState;
use crate::config::CompletionSettings;
use crate::logging::Logger;
use crate::mcp::ToolProvider;
use crate::providers::{ChatOptions, OpenAiProvider, Provider, ProviderModelConfig};
use crate::tools::ToolRegistry;
use crate::types::{ChatMessage, Choice, ToolChoice};

/// Upper bound for one query, registry build and every network call included
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs queries against a completion backend with tools from a set of providers
///
/// The client holds no conversation of its own; callers pass the
/// [`ConversationState`] in, so one client can serve many sessions.
pub struct ChatClient {
    providers: Vec<Arc<dyn ToolProvider>>,
    llm: Arc<dyn Provider>,
    model: ProviderModelConfig,
    query_timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl ChatClient {
    pub fn new(
        llm: Arc<dyn Provider>,
        model: ProviderModelConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            providers: Vec::new(),
            llm,
            model,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            logger,
        }
    }

    /// Client for an OpenAI-compatible endpoint described by `settings`
    pub fn from_settings(settings: &CompletionSettings, logger: Arc<dyn Logger>) -> Self {
        let model = ProviderModelConfig::new(&settings.model)
            .with_api_key(&settings.api_key)
            .with_api_base(&settings.api_base);
        let llm: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(Arc::clone(&logger)));
        Self::new(llm, model, logger)
    }

    /// Tool providers, in registration order
    pub fn with_providers(mut self, providers: Vec<Arc<dyn ToolProvider>>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn providers(&self) -> &[Arc<dyn ToolProvider>] {
        &self.providers
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Answer `query` in the context of `state`
    ///
    /// On success the user turn, any tool-call and tool-result turns, and the
    /// final assistant turn are appended to `state` and the reply is
    /// returned. On failure or timeout `state` is left untouched.
    pub async fn process_query(
        &self,
        state: &mut ConversationState,
        query: &str,
    ) -> ChatResult<String> {
        let round = self.run_round(state.messages(), query);
        let (staged, reply) = match tokio::time::timeout(self.query_timeout, round).await {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                crate::log_error!(self.logger, "[ChatClient] Query failed: {}", e);
                return Err(e);
            }
            Err(_) => {
                crate::log_error!(
                    self.logger,
                    "[ChatClient] Query timed out after {:?}",
                    self.query_timeout
                );
                return Err(ChatError::Timeout(self.query_timeout));
            }
        };

        state.commit(staged);
        Ok(reply)
    }

    /// One full round; returns the turns to commit and the reply
    async fn run_round(
        &self,
        history: &[ChatMessage],
        query: &str,
    ) -> ChatResult<(Vec<ChatMessage>, String)> {
        let registry = ToolRegistry::build(&self.providers, Arc::clone(&self.logger)).await;
        crate::log_debug!(
            self.logger,
            "[ChatClient] {} tools available from {} providers",
            registry.tool_count(),
            self.providers.len()
        );

        let mut transcript = history.to_vec();
        let base = transcript.len();
        transcript.push(ChatMessage::user(query));

        let tools = registry.llm_tools();
        let mut options = ChatOptions::new();
        if !tools.is_empty() {
            options = options.with_tools(tools).with_tool_choice(ToolChoice::Auto);
        }
        let choices = self.llm.complete(&transcript, &self.model, options).await?;

        let mut assembler = ResponseAssembler::new();
        for choice in &choices {
            assembler.push(&choice.content);
        }

        for choice in choices.into_iter().filter(wants_tools) {
            let Choice { tool_calls, .. } = choice;
            crate::log_info!(
                self.logger,
                "[ChatClient] Model requested {} tool call(s)",
                tool_calls.len()
            );

            let results = registry.execute_tool_calls(&tool_calls).await;
            transcript.push(ChatMessage::assistant_tool_calls(tool_calls));
            transcript.extend(results.iter().map(ChatMessage::from));

            let follow_up = self
                .llm
                .complete(&transcript, &self.model, ChatOptions::new())
                .await?;
            for next in &follow_up {
                assembler.push(&next.content);
            }
        }

        let reply = assembler.finish();
        transcript.push(ChatMessage::assistant(reply.clone()));
        Ok((transcript.split_off(base), reply))
    }
}

/// Content wins: tool calls only count on a choice without text
fn wants_tools(choice: &Choice) -> bool {
    !choice.has_text() && choice.has_tool_calls()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::mcp::StaticToolProvider;
    use crate::providers::MockProvider;
    use crate::types::{MessageRole, ToolCall};

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn client(llm: Arc<MockProvider>) -> ChatClient {
        ChatClient::new(llm, ProviderModelConfig::new("mock-model"), logger())
    }

    #[tokio::test]
    async fn test_text_answer_commits_two_turns() {
        let llm = Arc::new(MockProvider::fixed("hello", logger()));
        let mut state = ConversationState::new();

        let reply = client(llm.clone()).process_query(&mut state, "hi").await.unwrap();

        assert_eq!(reply, "hello");
        assert_eq!(
            state.messages(),
            &[ChatMessage::user("hi"), ChatMessage::assistant("hello")]
        );
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_content_wins_over_tool_calls() {
        let mixed = Choice {
            content: "direct".to_string(),
            tool_calls: vec![ToolCall::new("c1", "X", "{}")],
        };
        let llm = Arc::new(MockProvider::scripted(vec![vec![mixed]], logger()));
        let tools = Arc::new(StaticToolProvider::new("p").with_text_tool("X", "4"));
        let chat =
            client(llm.clone()).with_providers(vec![tools.clone() as Arc<dyn ToolProvider>]);
        let mut state = ConversationState::new();

        let reply = chat.process_query(&mut state, "q").await.unwrap();

        assert_eq!(reply, "direct");
        assert_eq!(llm.call_count(), 1);
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_carries_no_tools() {
        let llm = Arc::new(MockProvider::scripted(
            vec![
                vec![Choice::tool_calls(vec![ToolCall::new("c1", "X", "{}")])],
                vec![Choice::text("done")],
            ],
            logger(),
        ));
        let tools = Arc::new(StaticToolProvider::new("p").with_text_tool("X", "4"));
        let chat = client(llm.clone()).with_providers(vec![tools as Arc<dyn ToolProvider>]);

        chat.process_query(&mut ConversationState::new(), "q").await.unwrap();

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].tools.as_ref().map(|t| t.len()), Some(1));
        assert!(requests[1].tools.is_none());
        let roles: Vec<MessageRole> = requests[1].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::Tool]
        );
    }

    #[tokio::test]
    async fn test_failure_leaves_state_untouched() {
        let llm = Arc::new(MockProvider::error("down", logger()));
        let mut state = ConversationState::with_messages(vec![ChatMessage::system("sys")]);

        let err = client(llm).process_query(&mut state, "q").await.unwrap_err();

        assert!(matches!(err, ChatError::Provider(_)));
        assert_eq!(state.len(), 1);
    }

    #[tokio::test]
    async fn test_no_tools_means_no_tool_field() {
        let llm = Arc::new(MockProvider::echo(logger()));
        client(llm.clone())
            .process_query(&mut ConversationState::new(), "ping")
            .await
            .unwrap();
        assert!(llm.requests()[0].tools.is_none());
    }
}
