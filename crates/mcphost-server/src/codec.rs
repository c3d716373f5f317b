//! WebSocket frame codec
//!
//! Frames are protobuf `ChatMessage { string role = 1; string content = 2; }`
//! (see `proto/chat.proto`).

use prost::Message;
use thiserror::Error;

/// Role stamped on every reply frame
pub const ASSISTANT_ROLE: &str = "assistant";

/// One decoded frame
#[derive(Clone, PartialEq, Message)]
pub struct ChatFrame {
    #[prost(string, tag = "1")]
    pub role: String,
    #[prost(string, tag = "2")]
    pub content: String,
}

impl ChatFrame {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed frame: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Decode an inbound frame
///
/// Only undecodable bytes are rejected. A frame with empty content is still a
/// query; an empty payload decodes to one.
pub fn decode_frame(bytes: &[u8]) -> Result<ChatFrame, CodecError> {
    Ok(ChatFrame::decode(bytes)?)
}

/// Encode an assistant reply
pub fn encode_reply(content: &str) -> Vec<u8> {
    ChatFrame::new(ASSISTANT_ROLE, content).encode_to_vec()
}
