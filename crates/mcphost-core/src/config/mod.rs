//! Configuration sources
//!
//! - [`McpConfigFile`]: the tool-server file (JSON or YAML)
//! - [`CompletionSettings`]: completion endpoint settings from the environment

mod env;
mod error;
mod file;

pub use env::{CompletionSettings, ENV_API_BASE, ENV_API_KEY, ENV_API_MODEL};
pub use error::{ConfigError, ConfigResult};
pub use file::{McpConfigFile, McpServerConfig, TransportKind, DEFAULT_CONFIG_FILE};
