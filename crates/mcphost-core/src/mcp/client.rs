//! MCP client using the official rmcp SDK
//!
//! Connects to tool servers over a child-process pipe or Streamable HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation,
        RawContent,
    },
    service::{Peer, RunningService},
    transport::{
        ConfigureCommandExt, IntoTransport, StreamableHttpClientTransport, TokioChildProcess,
    },
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};
use tokio::process::Command;
use tokio::sync::Mutex;

use super::error::{McpError, McpResult};
use super::provider::{ToolOutput, ToolProvider};
use crate::config::{McpConfigFile, McpServerConfig, TransportKind};
use crate::logging::Logger;
use crate::types::Tool;

/// Version announced in the initialization handshake
pub const CLIENT_VERSION: &str = "1.0.0";

/// A live connection to one configured tool server
pub struct McpClient {
    /// Configuration entry name
    name: String,
    /// Request handle; stays usable while the client is shared
    peer: Peer<RoleClient>,
    /// Background service, taken on close
    service: Mutex<Option<RunningService<RoleClient, ClientInfo>>>,
    logger: Arc<dyn Logger>,
}

fn client_info(name: &str) -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: name.to_string(),
            title: None,
            version: CLIENT_VERSION.to_string(),
            website_url: None,
            icons: None,
        },
    }
}

impl McpClient {
    /// Connect according to a config entry
    pub async fn connect(
        name: &str,
        config: &McpServerConfig,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        match config.transport(name)? {
            TransportKind::Stdio => {
                Self::connect_stdio(name, &config.command, &config.args, logger).await
            }
            TransportKind::Http => Self::connect_http(name, &config.command, logger).await,
            TransportKind::Sse => {
                logger.warn(&format!(
                    "[McpClient] '{}': sse endpoints are reached through the streamable HTTP client",
                    name
                ));
                Self::connect_http(name, &config.command, logger).await
            }
        }
    }

    /// Spawn `command` and talk to it over stdin/stdout
    pub async fn connect_stdio(
        name: &str,
        command: &str,
        args: &[String],
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        logger.info(&format!("[McpClient] '{}': spawning {} {:?}", name, command, args));

        let transport = TokioChildProcess::new(Command::new(command).configure(|cmd| {
            cmd.args(args);
        }))
        .map_err(|e| McpError::ConnectionFailed(e.to_string()))?;

        Self::connect_with(name, transport, logger).await
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(name: &str, url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        logger.info(&format!("[McpClient] '{}': connecting to {}", name, url));
        let transport = StreamableHttpClientTransport::from_uri(url.to_string());
        Self::connect_with(name, transport, logger).await
    }

    /// Run the initialization handshake over any rmcp transport
    pub async fn connect_with<T, E, A>(
        name: &str,
        transport: T,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let service = client_info(name)
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        let this = Self {
            name: name.to_string(),
            peer: service.peer().clone(),
            service: Mutex::new(Some(service)),
            logger,
        };
        match this.server_info() {
            Some(info) => this.logger.info(&format!(
                "[McpClient] '{}': connected to {} {}",
                this.name, info.name, info.version
            )),
            None => this
                .logger
                .info(&format!("[McpClient] '{}': connected", this.name)),
        }
        Ok(this)
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.peer.peer_info().map(|info| &info.server_info)
    }

    /// Close the connection and wait for the transport to shut down
    ///
    /// Works through a shared reference, so clients still held elsewhere are
    /// closed too; later requests on any clone fail. Closing twice is a no-op.
    pub async fn close(&self) -> McpResult<()> {
        let Some(service) = self.service.lock().await.take() else {
            return Ok(());
        };
        self.logger
            .info(&format!("[McpClient] '{}': closing connection", self.name));
        service
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }

    pub async fn is_closed(&self) -> bool {
        self.service.lock().await.is_none()
    }
}

/// Connect every configured server, in name order
///
/// Each connection is bounded by `connect_timeout`. Failures are collected
/// rather than returned early, so one bad entry never blocks the others.
pub async fn connect_all(
    config: &McpConfigFile,
    logger: Arc<dyn Logger>,
    connect_timeout: Duration,
) -> (Vec<Arc<McpClient>>, Vec<McpError>) {
    let mut clients = Vec::new();
    let mut errors = Vec::new();

    for (name, server) in &config.mcp_servers {
        let attempt = McpClient::connect(name, server, Arc::clone(&logger));
        match tokio::time::timeout(connect_timeout, attempt).await {
            Ok(Ok(client)) => clients.push(Arc::new(client)),
            Ok(Err(e)) => errors.push(e.for_server(name)),
            Err(_) => errors.push(McpError::Timeout(connect_timeout).for_server(name)),
        }
    }

    (clients, errors)
}

/// Close every client, including ones still held by live sessions
pub async fn close_all(clients: &[Arc<McpClient>], logger: &dyn Logger) {
    for client in clients {
        if let Err(e) = client.close().await {
            logger.warn(&format!("[McpClient] '{}': close failed: {}", client.name, e));
        }
    }
}

/// Text parts joined by newlines; structured content stands in when no text is present
fn output_from_result(result: CallToolResult) -> ToolOutput {
    let texts: Vec<String> = result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect();

    let content = match (texts.is_empty(), &result.structured_content) {
        (true, Some(structured)) => structured.to_string(),
        _ => texts.join("\n"),
    };

    ToolOutput {
        content,
        is_error: result.is_error.unwrap_or(false),
    }
}

fn tool_from_rmcp(tool: rmcp::model::Tool) -> Tool {
    Tool {
        name: tool.name.to_string(),
        description: tool.description.as_deref().unwrap_or_default().to_string(),
        input_schema: Value::Object(tool.input_schema.as_ref().clone()),
    }
}

#[async_trait]
impl ToolProvider for McpClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let result = self
            .peer
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger.debug(&format!(
            "[McpClient] '{}': listed {} tools",
            self.name,
            result.tools.len()
        ));

        Ok(result.tools.into_iter().map(tool_from_rmcp).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput> {
        self.logger
            .debug(&format!("[McpClient] '{}': calling tool {}", self.name, name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let result = self
            .peer
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))?;

        Ok(output_from_result(result))
    }
}
