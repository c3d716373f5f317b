//! IP geolocation tool server
//!
//! Exposes one MCP tool, `ip_location_query`, backed by the ip-api.com JSON
//! endpoint. The response body is handed back to the model verbatim.

use std::net::IpAddr;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use thiserror::Error;

pub const SERVER_NAME: &str = "ip-location-server";
pub const SERVER_VERSION: &str = "1.0.0";
pub const DEFAULT_API_BASE: &str = "http://ip-api.com/json";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid IP address")]
    InvalidIp(String),

    #[error("lookup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MCP service error: {0}")]
    Service(String),
}

/// Thin client for the geolocation HTTP API
#[derive(Debug, Clone)]
pub struct IpLookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl IpLookupClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Validate `ip` and return the raw API response body
    pub async fn lookup(&self, ip: &str) -> Result<String, LookupError> {
        let addr: IpAddr = ip
            .parse()
            .map_err(|_| LookupError::InvalidIp(ip.to_string()))?;

        let url = format!("{}/{}", self.base_url, addr);
        tracing::debug!(%url, "querying geolocation");
        let body = self.http.get(&url).send().await?.text().await?;
        Ok(body)
    }
}

impl Default for IpLookupClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IpLocationRequest {
    #[schemars(description = "The IP address to look up")]
    pub ip: String,
}

#[derive(Clone)]
pub struct IpLocationServer {
    client: IpLookupClient,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl IpLocationServer {
    pub fn new(client: IpLookupClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "ip_location_query",
        description = "Query the geographic location of an IP address"
    )]
    async fn ip_location_query(
        &self,
        Parameters(IpLocationRequest { ip }): Parameters<IpLocationRequest>,
    ) -> Result<String, String> {
        self.client.lookup(&ip).await.map_err(|e| {
            tracing::warn!(%ip, error = %e, "lookup failed");
            e.to_string()
        })
    }
}

#[tool_handler]
impl ServerHandler for IpLocationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some("Use ip_location_query to locate an IP address.".to_string()),
            ..Default::default()
        }
    }
}
