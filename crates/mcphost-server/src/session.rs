//! One chat session per WebSocket connection

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use mcphost_core::{ChatClient, ConversationState};

use crate::codec::{decode_frame, encode_reply};

/// Conversation bound to a single connection
pub struct ChatSession {
    client: Arc<ChatClient>,
    state: ConversationState,
}

impl ChatSession {
    pub fn new(client: Arc<ChatClient>) -> Self {
        Self {
            client,
            state: ConversationState::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Handle one inbound frame and produce the reply frame, if any
    ///
    /// Malformed frames and failed queries yield `None`; the session stays usable.
    pub async fn handle_frame(&mut self, bytes: &[u8]) -> Option<Vec<u8>> {
        let frame = match decode_frame(bytes) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "dropping inbound frame");
                return None;
            }
        };

        tracing::debug!(role = %frame.role, len = frame.content.len(), "query received");
        match self.client.process_query(&mut self.state, &frame.content).await {
            Ok(reply) => Some(encode_reply(&reply)),
            Err(e) => {
                tracing::error!(error = %e, "query failed, no reply sent");
                None
            }
        }
    }
}

/// Upgrade handler for `/ws`; any origin is accepted
pub async fn ws_handler(ws: WebSocketUpgrade, State(client): State<Arc<ChatClient>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, client))
}

async fn handle_socket(mut socket: WebSocket, client: Arc<ChatClient>) {
    tracing::info!("WebSocket client connected");
    let mut session = ChatSession::new(client);

    while let Some(msg) = socket.recv().await {
        let payload = match msg {
            Ok(Message::Binary(data)) => data.to_vec(),
            Ok(Message::Text(text)) => text.as_str().as_bytes().to_vec(),
            Ok(Message::Ping(data)) => {
                if socket.send(Message::Pong(data)).await.is_err() {
                    break;
                }
                continue;
            }
            Ok(Message::Close(_)) => {
                tracing::info!("Client sent close");
                break;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("WebSocket error: {:?}", e);
                break;
            }
        };

        if let Some(reply) = session.handle_frame(&payload).await {
            if socket.send(Message::Binary(reply.into())).await.is_err() {
                break;
            }
        }
    }

    tracing::info!(turns = session.state().len(), "WebSocket client disconnected");
}
