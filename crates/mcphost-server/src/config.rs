//! Command line and environment configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mcphost_core::{CompletionSettings, McpConfigFile};

use crate::error::ServerResult;

#[derive(Parser, Debug, Clone)]
#[command(name = "mcphost")]
#[command(about = "WebSocket chat server with MCP tool calling")]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "MCPHOST_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Tool-server configuration file (JSON, or YAML by extension)
    #[arg(long, env = "MCPHOST_CONFIG", default_value = mcphost_core::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Upper bound for one query, in seconds
    #[arg(long, default_value_t = 60)]
    pub query_timeout_secs: u64,

    /// Upper bound for connecting one tool server, in seconds
    #[arg(long, default_value_t = 30)]
    pub connect_timeout_secs: u64,
}

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    /// Resolved tool-server file, if any exists
    pub mcp_config: Option<PathBuf>,
    pub query_timeout: Duration,
    pub connect_timeout: Duration,
    pub completion: CompletionSettings,
}

impl Cli {
    /// Combine flags with completion settings from the environment
    pub fn into_config(self) -> ServerResult<ServerConfig> {
        self.with_settings(CompletionSettings::from_env()?)
    }

    pub fn with_settings(self, completion: CompletionSettings) -> ServerResult<ServerConfig> {
        Ok(ServerConfig {
            listen: self.listen,
            mcp_config: McpConfigFile::resolve_path(&self.config),
            query_timeout: Duration::from_secs(self.query_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mcphost"]).unwrap();
        assert_eq!(cli.listen, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.query_timeout_secs, 60);
        assert_eq!(cli.connect_timeout_secs, 30);
    }

    #[test]
    fn test_flags_and_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("servers.yaml");
        std::fs::write(&path, "mcpServers: {}\n").unwrap();

        let cli = Cli::try_parse_from([
            "mcphost",
            "--listen",
            "127.0.0.1:9000",
            "--config",
            path.to_str().unwrap(),
            "--query-timeout-secs",
            "5",
        ])
        .unwrap();

        let config = cli
            .with_settings(CompletionSettings::new("k", "http://x", "m"))
            .unwrap();
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.mcp_config, Some(path));
        assert_eq!(config.query_timeout, Duration::from_secs(5));
    }
}
