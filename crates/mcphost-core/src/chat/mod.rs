//! Chat orchestration
//!
//! [`ChatClient::process_query`] drives one round:
//!
//! ```text
//! build registry ─▶ complete(history + user, tools)
//!                        │
//!          text ◀────────┴────────▶ tool calls
//!            │                         │ dispatch, append results
//!            │                         ▼
//!            │                complete(history + turns, no tools)
//!            └──────────┬──────────────┘
//!                       ▼
//!             join texts, commit turns
//! ```

mod assembler;
mod client;
mod error;
mod state;

pub use assembler::ResponseAssembler;
pub use client::{ChatClient, DEFAULT_QUERY_TIMEOUT};
pub use error::{ChatError, ChatResult};
pub use state::ConversationState;
