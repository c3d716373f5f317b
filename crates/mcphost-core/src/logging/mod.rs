//! Logging abstractions
//!
//! The core only talks to the [`Logger`] trait. Binaries plug in
//! [`TracingLogger`]; tests use [`NoOpLogger`] or [`MemoryLogger`].

mod traits;
mod memory;
mod tracing_logger;

pub use traits::Logger;
pub use memory::{NoOpLogger, MemoryLogger, LogLevel};
pub use tracing_logger::TracingLogger;
