//! Core types for LLM interactions
//!
//! This module contains all the shared types used across providers.

mod message;
mod tool;
mod completion;

pub use message::{ChatMessage, MessageRole};
pub use tool::{Tool, ToolCall, ToolResult, ToolChoice};
pub use completion::Choice;
