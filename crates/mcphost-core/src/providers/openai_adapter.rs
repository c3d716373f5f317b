//! OpenAI chat-completions wire format
//!
//! Conversion between the crate's message/tool types and the JSON shapes of
//! `POST {base}/chat/completions`.

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Choice, MessageRole, Tool, ToolCall, ToolChoice};

#[derive(Debug, Serialize)]
pub(crate) struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: String,
    /// `null` on assistant turns that only carry tool calls
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    pub function: WireFunction,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireFunction {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoice {
    pub message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

fn function_type() -> String {
    "function".to_string()
}

pub(crate) fn to_wire_message(message: &ChatMessage) -> WireMessage {
    let tool_call_only = message.role == MessageRole::Assistant
        && message.has_tool_calls()
        && message.content.is_empty();
    let content = if tool_call_only {
        None
    } else {
        Some(message.content.clone())
    };

    WireMessage {
        role: message.role.as_str().to_string(),
        content,
        tool_calls: message.tool_calls.iter().map(to_wire_tool_call).collect(),
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn to_wire_tool_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.id.clone(),
        call_type: function_type(),
        function: WireFunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    }
}

pub(crate) fn to_wire_tool(tool: &Tool) -> WireTool {
    WireTool {
        tool_type: "function",
        function: WireFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.input_schema.clone(),
        },
    }
}

pub(crate) fn tool_choice_str(choice: ToolChoice) -> &'static str {
    match choice {
        ToolChoice::Auto => "auto",
        ToolChoice::None => "none",
        ToolChoice::Required => "required",
    }
}

/// Arguments stay the raw string the model produced
pub(crate) fn from_wire_choice(choice: WireChoice) -> Choice {
    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|c| ToolCall::new(c.id, c.function.name, c.function.arguments))
        .collect();

    Choice {
        content: choice.message.content.unwrap_or_default(),
        tool_calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assistant_tool_call_turn_has_null_content() {
        let msg = ChatMessage::assistant_tool_calls(vec![ToolCall::new("c1", "X", "{}")]);
        let wire = serde_json::to_value(to_wire_message(&msg)).unwrap();

        assert_eq!(
            wire,
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [
                    { "id": "c1", "type": "function", "function": { "name": "X", "arguments": "{}" } }
                ]
            })
        );
    }

    #[test]
    fn test_tool_turn_carries_call_id() {
        let wire = serde_json::to_value(to_wire_message(&ChatMessage::tool("c1", "4"))).unwrap();
        assert_eq!(wire, json!({ "role": "tool", "content": "4", "tool_call_id": "c1" }));
    }

    #[test]
    fn test_tool_schema_shape() {
        let tool = Tool::new("ping", "Ping a host").with_schema(json!({
            "type": "object",
            "properties": { "host": { "type": "string" } }
        }));
        let wire = serde_json::to_value(to_wire_tool(&tool)).unwrap();
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "ping");
        assert_eq!(wire["function"]["parameters"]["properties"]["host"]["type"], "string");
    }

    #[test]
    fn test_choice_conversion_keeps_raw_arguments() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": null, "tool_calls": [
                    { "id": "c1", "type": "function", "function": { "name": "X", "arguments": "not json" } }
                ] } },
                { "index": 1, "message": { "role": "assistant", "content": "hi" } }
            ]
        }))
        .unwrap();

        let choices: Vec<Choice> = response.choices.into_iter().map(from_wire_choice).collect();
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].tool_calls[0].arguments, "not json");
        assert!(!choices[0].has_text());
        assert_eq!(choices[1].content, "hi");
    }
}
