//! Injected logging for pipeline components.
//!
//! Writers, builders and collaborators never reach for a global logger.
//! They hold an `Arc<dyn Logger>` handed to them at construction, so two
//! pipelines in the same process (or two tests running in parallel) log
//! independently.
//!
//! - [`TracingLogger`] forwards to the `tracing` crate (production)
//! - [`NoOpLogger`] discards everything
//! - [`MemoryLogger`] keeps every record in memory for assertions
//!
//! ```
//! use geowriter::log::{Logger, MemoryLogger, LogLevel};
//! use geowriter::log_warn;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(MemoryLogger::new());
//! log_warn!(logger, "skipping path {}", 42);
//! assert_eq!(logger.count_at_least(LogLevel::Warn), 1);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
