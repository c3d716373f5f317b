//! Completion response types

use serde::{Deserialize, Serialize};

use super::tool::ToolCall;

/// One candidate answer from a completion call
///
/// A model normally returns either text or tool calls; both fields are kept
/// because some backends fill both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Text content (empty when the model only requested tools)
    #[serde(default)]
    pub content: String,
    /// Tool invocations requested by the model
    #[serde(rename = "toolCalls", default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Choice {
    /// Create a text choice
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create a choice that requests tool invocations
    pub fn tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: String::new(),
            tool_calls,
        }
    }

    /// Whether the choice carries non-empty text
    pub fn has_text(&self) -> bool {
        !self.content.is_empty()
    }

    /// Whether the choice requests any tool invocation
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
