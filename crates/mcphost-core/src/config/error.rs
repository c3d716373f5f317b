//! Configuration errors

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required environment variable not set: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid server entry '{server}': {reason}")]
    InvalidServer { server: String, reason: String },

    #[error("Unknown transport type for '{server}': {transport}")]
    UnknownTransport { server: String, transport: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
