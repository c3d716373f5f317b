//! Completion providers
//!
//! The orchestration loop only sees the [`Provider`] trait. [`OpenAiProvider`]
//! talks to any OpenAI-compatible `chat/completions` endpoint; [`MockProvider`]
//! is kept for tests.

mod error;
mod mock;
mod openai_adapter;
mod openai_provider;
mod traits;

pub use error::{ProviderError, ProviderResult};
pub use mock::{MockMode, MockProvider, RecordedRequest};
pub use openai_provider::OpenAiProvider;
pub use traits::{ChatOptions, Provider, ProviderModelConfig};
