//! Tool-server configuration file
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "ip": { "type": "http", "command": "http://localhost:8080/mcp" },
//!     "fs": { "type": "stdio", "command": "mcp-fs", "args": ["/tmp"] }
//!   }
//! }
//! ```
//!
//! `command` is the executable for `stdio` servers and the endpoint URL for
//! `http`/`sse` servers. Files ending in `.yaml`/`.yml` are parsed as YAML,
//! everything else as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// File name looked up in the user config directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// How a tool server is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Child process speaking over stdin/stdout
    Stdio,
    /// Streamable HTTP endpoint
    Http,
    /// Server-push event stream endpoint
    Sse,
}

impl TransportKind {
    /// Parse a transport name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "stdio" => Some(TransportKind::Stdio),
            "http" => Some(TransportKind::Http),
            "sse" => Some(TransportKind::Sse),
            _ => None,
        }
    }
}

/// One configured tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Transport name (`stdio`, `http` or `sse`)
    #[serde(rename = "type", default)]
    pub server_type: String,
    /// Executable (stdio) or URL (http/sse)
    #[serde(default)]
    pub command: String,
    /// Extra arguments for stdio servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl McpServerConfig {
    pub fn http(url: impl Into<String>) -> Self {
        Self {
            server_type: "http".to_string(),
            command: url.into(),
            args: Vec::new(),
        }
    }

    /// Resolve the transport kind; unknown names are an error for this server only
    pub fn transport(&self, name: &str) -> ConfigResult<TransportKind> {
        TransportKind::parse(&self.server_type).ok_or_else(|| ConfigError::UnknownTransport {
            server: name.to_string(),
            transport: self.server_type.clone(),
        })
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfigFile {
    /// Configured servers keyed by name; iteration order is name order
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: BTreeMap<String, McpServerConfig>,
}

impl McpConfigFile {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = if is_yaml(path) {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse from JSON text (not validated)
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse from YAML text (not validated)
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Every server must name a transport and a command
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, server) in &self.mcp_servers {
            if server.server_type.trim().is_empty() {
                return Err(ConfigError::InvalidServer {
                    server: name.clone(),
                    reason: "'type' is required".to_string(),
                });
            }
            if server.command.trim().is_empty() {
                return Err(ConfigError::InvalidServer {
                    server: name.clone(),
                    reason: "'command' is required".to_string(),
                });
            }
        }
        Ok(())
    }

    /// User-level config path (`<config_dir>/mcphost/config.json`)
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        config_dir.join("mcphost").join(DEFAULT_CONFIG_FILE)
    }

    /// Pick the first existing file among `preferred` and the user-level path
    pub fn resolve_path(preferred: impl AsRef<Path>) -> Option<PathBuf> {
        let preferred = preferred.as_ref();
        if preferred.exists() {
            return Some(preferred.to_path_buf());
        }
        let user = Self::user_path();
        user.exists().then_some(user)
    }

    pub fn is_empty(&self) -> bool {
        self.mcp_servers.is_empty()
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
