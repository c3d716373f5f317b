//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool definition for function calling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name)
    pub name: String,
    /// Description of what the tool does
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema", default = "empty_object_schema")]
    pub input_schema: Value,
}

fn empty_object_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

impl Tool {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: empty_object_schema(),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Tool call requested by the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Arguments exactly as the model produced them (JSON text)
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Decode the raw arguments as a JSON object.
    ///
    /// Anything that is not a JSON object (malformed text, arrays, scalars,
    /// empty string) decodes to an empty map.
    pub fn input(&self) -> Map<String, Value> {
        match serde_json::from_str::<Value>(&self.arguments) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Tool result to send back to LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    #[serde(rename = "callId")]
    pub call_id: String,
    /// The result content
    pub content: String,
    /// Whether this result represents an error
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(call_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: error.into(),
            is_error: true,
        }
    }
}

/// Tool choice option for requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to use tools
    #[default]
    Auto,
    /// Don't use tools
    None,
    /// Force tool use
    Required,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("ip_location_query", "Query the geographic location of an IP address")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "ip": { "type": "string" }
                },
                "required": ["ip"]
            }));

        assert_eq!(tool.name, "ip_location_query");
        assert_eq!(tool.input_schema["required"][0], "ip");
    }

    #[test]
    fn test_tool_default_schema() {
        let tool = Tool::new("ping", "");
        assert_eq!(tool.input_schema["type"], "object");

        let parsed: Tool = serde_json::from_str(r#"{"name":"ping"}"#).unwrap();
        assert_eq!(parsed, tool);
    }

    #[test]
    fn test_tool_call_input() {
        let call = ToolCall::new(
            "call_123",
            "ip_location_query",
            r#"{"ip": "1.1.1.1", "lang": "en"}"#,
        );
        let input = call.input();
        assert_eq!(input.get("ip"), Some(&json!("1.1.1.1")));
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_tool_call_input_degrades_to_empty() {
        for raw in ["", "{not json", "[1, 2]", "\"text\"", "42", "null"] {
            let call = ToolCall::new("call_1", "x", raw);
            assert!(call.input().is_empty(), "expected empty map for {raw:?}");
        }
    }

    #[test]
    fn test_tool_result() {
        let success = ToolResult::success("call_123", "72°F, sunny");
        assert!(!success.is_error);

        let error = ToolResult::error("call_456", "Location not found");
        assert!(error.is_error);
    }
}
