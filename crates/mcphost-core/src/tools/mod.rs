//! Tool aggregation and dispatch
//!
//! ```text
//! providers ──list_tools──▶ ToolRegistry ──llm_tools──▶ completion request
//!                               │
//!           ◀──call_tool────────┘  (routed by tool name)
//! ```

mod registry;

pub use registry::{ToolInfo, ToolRegistry};
