//! Tool registry: schema aggregation and dispatch by name
//!
//! A registry is a snapshot. It is rebuilt from the providers for every
//! query, so tools added or removed on a server show up on the next query.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::Logger;
use crate::mcp::ToolProvider;
use crate::types::{Tool, ToolCall, ToolResult};

/// Information about a tool with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for tool parameters
    pub input_schema: Value,
    /// Name of the provider that listed it
    pub source: String,
}

impl ToolInfo {
    fn from_tool(tool: Tool, source: &str) -> Self {
        Self {
            name: tool.name,
            description: tool.description,
            input_schema: tool.input_schema,
            source: source.to_string(),
        }
    }
}

impl From<&ToolInfo> for Tool {
    fn from(info: &ToolInfo) -> Self {
        Tool {
            name: info.name.clone(),
            description: info.description.clone(),
            input_schema: info.input_schema.clone(),
        }
    }
}

/// Flattened tool list plus a name to provider routing table
pub struct ToolRegistry {
    /// Every listed tool, in provider order then listing order
    tools: Vec<ToolInfo>,
    /// Last provider to list a name wins
    routes: HashMap<String, Arc<dyn ToolProvider>>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Query every provider, in order, and build the registry
    ///
    /// A provider whose listing fails is logged and left out.
    pub async fn build(providers: &[Arc<dyn ToolProvider>], logger: Arc<dyn Logger>) -> Self {
        let mut tools = Vec::new();
        let mut routes: HashMap<String, Arc<dyn ToolProvider>> = HashMap::new();

        for provider in providers {
            let listed = match provider.list_tools().await {
                Ok(listed) => listed,
                Err(e) => {
                    logger.error(&format!(
                        "[ToolRegistry] Failed to list tools from '{}': {}",
                        provider.name(),
                        e
                    ));
                    continue;
                }
            };

            logger.debug(&format!(
                "[ToolRegistry] '{}' provides {} tools",
                provider.name(),
                listed.len()
            ));

            for tool in listed {
                if let Some(previous) = routes.insert(tool.name.clone(), Arc::clone(provider)) {
                    logger.warn(&format!(
                        "[ToolRegistry] Tool '{}' from '{}' shadows the one from '{}'",
                        tool.name,
                        provider.name(),
                        previous.name()
                    ));
                }
                tools.push(ToolInfo::from_tool(tool, provider.name()));
            }
        }

        Self {
            tools,
            routes,
            logger,
        }
    }

    /// Tool schemas to attach to a completion request
    pub fn llm_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(Tool::from).collect()
    }

    pub fn tools(&self) -> &[ToolInfo] {
        &self.tools
    }

    /// The provider that will serve `name`
    pub fn provider_for(&self, name: &str) -> Option<&Arc<dyn ToolProvider>> {
        self.routes.get(name)
    }

    /// Number of listed tools, duplicates included
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call from an LLM response
    ///
    /// Returns `None` when the tool is unknown or the call itself failed.
    pub async fn execute_tool_call(&self, tool_call: &ToolCall) -> Option<ToolResult> {
        let arguments = tool_call.input();
        if arguments.is_empty() && !is_object_or_blank(&tool_call.arguments) {
            self.logger.warn(&format!(
                "[ToolRegistry] Arguments for '{}' are not a JSON object, using {{}}",
                tool_call.name
            ));
        }

        let Some(provider) = self.provider_for(&tool_call.name) else {
            self.logger.warn(&format!(
                "[ToolRegistry] No provider for tool '{}' (call {}), skipping",
                tool_call.name, tool_call.id
            ));
            return None;
        };

        self.logger.info(&format!(
            "[ToolRegistry] Calling tool '{}' on '{}'",
            tool_call.name,
            provider.name()
        ));

        match provider.call_tool(&tool_call.name, arguments).await {
            Ok(output) => {
                if output.is_error {
                    self.logger.warn(&format!(
                        "[ToolRegistry] Tool '{}' reported an error: {}",
                        tool_call.name, output.content
                    ));
                }
                Some(ToolResult {
                    call_id: tool_call.id.clone(),
                    content: output.content,
                    is_error: output.is_error,
                })
            }
            Err(e) => {
                self.logger.error(&format!(
                    "[ToolRegistry] Tool '{}' failed: {}",
                    tool_call.name, e
                ));
                None
            }
        }
    }

    /// Execute all calls of one model turn concurrently
    ///
    /// Results keep the order of `tool_calls`; skipped calls leave no entry.
    pub async fn execute_tool_calls(&self, tool_calls: &[ToolCall]) -> Vec<ToolResult> {
        join_all(tool_calls.iter().map(|call| self.execute_tool_call(call)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

fn is_object_or_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || matches!(serde_json::from_str::<Value>(trimmed), Ok(Value::Object(_)))
}
