//! mcphost core
//!
//! Tool-augmented chat orchestration. This crate is transport-agnostic: the
//! WebSocket server and any other front end only hand a
//! [`ConversationState`] and a user message to [`ChatClient::process_query`].
//!
//! ## Tool Orchestration
//!
//! Tools come from [`ToolProvider`]s (MCP servers via [`McpClient`]). For every
//! query the registry is rebuilt, the model sees the flattened schema list,
//! requested calls are dispatched by name, and a follow-up completion turns the
//! results into the reply.
//!
//! ```rust,ignore
//! use mcphost_core::{ChatClient, ConversationState, CompletionSettings, TracingLogger};
//!
//! let logger = Arc::new(TracingLogger::new());
//! let (clients, _errors) = mcp::connect_all(&config, logger.clone(), timeout).await;
//! let chat = ChatClient::from_settings(&CompletionSettings::from_env()?, logger)
//!     .with_providers(clients.into_iter().map(|c| c as Arc<dyn ToolProvider>).collect());
//!
//! let mut state = ConversationState::new();
//! let reply = chat.process_query(&mut state, "Where is 8.8.8.8?").await?;
//! ```

pub mod chat;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod providers;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{ChatMessage, Choice, MessageRole, Tool, ToolCall, ToolChoice, ToolResult};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{CompletionSettings, ConfigError, McpConfigFile, McpServerConfig, TransportKind};

pub use providers::{
    ChatOptions, MockProvider, OpenAiProvider, Provider, ProviderError, ProviderModelConfig,
};

pub use mcp::{McpClient, McpError, McpResult, StaticToolProvider, ToolOutput, ToolProvider};

pub use tools::{ToolInfo, ToolRegistry};

pub use chat::{ChatClient, ChatError, ChatResult, ConversationState};
