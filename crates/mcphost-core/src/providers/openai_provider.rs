//! OpenAI-compatible completion provider over `reqwest`

use async_trait::async_trait;
use std::sync::Arc;

use crate::logging::Logger;
use crate::types::{ChatMessage, Choice};

use super::error::{ProviderError, ProviderResult};
use super::openai_adapter::{
    from_wire_choice, to_wire_message, to_wire_tool, tool_choice_str, CompletionRequest,
    CompletionResponse,
};
use super::traits::{ChatOptions, Provider, ProviderModelConfig};

const PROVIDER_NAME: &str = "openai";

/// Provider for any endpoint speaking the chat-completions protocol
pub struct OpenAiProvider {
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl OpenAiProvider {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::with_client(reqwest::Client::new(), logger)
    }

    /// Use a preconfigured HTTP client (proxies, timeouts)
    pub fn with_client(http: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self { http, logger }
    }

    fn endpoint(&self, model: &ProviderModelConfig) -> String {
        format!("{}/chat/completions", self.get_api_base(model).trim_end_matches('/'))
    }

    fn build_request(
        messages: &[ChatMessage],
        model: &ProviderModelConfig,
        options: ChatOptions,
    ) -> CompletionRequest {
        let tools = options
            .tools
            .filter(|t| !t.is_empty())
            .map(|t| t.iter().map(to_wire_tool).collect::<Vec<_>>());
        let tool_choice = match (&tools, options.tool_choice) {
            (Some(_), Some(choice)) => Some(tool_choice_str(choice)),
            _ => None,
        };

        CompletionRequest {
            model: model.model.clone(),
            messages: messages.iter().map(to_wire_message).collect(),
            tools,
            tool_choice,
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn default_api_base(&self) -> &str {
        "https://api.openai.com/v1"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &ProviderModelConfig,
        options: ChatOptions,
    ) -> ProviderResult<Vec<Choice>> {
        let api_key = model
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::missing_api_key(PROVIDER_NAME))?;

        let url = self.endpoint(model);
        let body = Self::build_request(messages, model, options);
        self.logger.debug(&format!(
            "[OpenAiProvider] POST {} model={} messages={} tools={}",
            url,
            body.model,
            body.messages.len(),
            body.tools.as_ref().map_or(0, |t| t.len())
        ));

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            self.logger.warn(&format!(
                "[OpenAiProvider] request failed with status {}",
                status.as_u16()
            ));
            return Err(ProviderError::from_status(PROVIDER_NAME, status.as_u16(), text));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ProviderError::invalid_response(PROVIDER_NAME, format!("{e}: {text}")))?;

        let choices: Vec<Choice> = parsed.choices.into_iter().map(from_wire_choice).collect();
        self.logger.debug(&format!(
            "[OpenAiProvider] received {} choice(s)",
            choices.len()
        ));
        Ok(choices)
    }
}
