//! Orchestration errors

use std::time::Duration;

use thiserror::Error;

use crate::providers::ProviderError;

/// Errors that abort a query
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("completion failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

pub type ChatResult<T> = Result<T, ChatError>;
