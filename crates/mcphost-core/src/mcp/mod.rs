//! Tool providers
//!
//! [`ToolProvider`] is the seam between the orchestration loop and whatever
//! serves tools. [`McpClient`] speaks MCP through the official rmcp SDK over
//! a child-process pipe or Streamable HTTP.
//!
//! ```rust,ignore
//! use mcphost_core::mcp::{connect_all, ToolProvider};
//!
//! let (clients, errors) = connect_all(&config, logger, Duration::from_secs(30)).await;
//! let tools = clients[0].list_tools().await?;
//! ```

mod client;
mod error;
mod provider;
mod static_provider;

pub use client::{close_all, connect_all, McpClient, CLIENT_VERSION};
pub use error::{McpError, McpResult};
pub use provider::{ToolOutput, ToolProvider};
pub use static_provider::{StaticOutcome, StaticToolProvider};
