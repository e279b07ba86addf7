//! Logging abstractions
//!
//! Resolution steps are reported through the [`Logger`] trait so hosts can
//! route them wherever they like. [`TracingLogger`] (the default) forwards to
//! the `tracing` ecosystem; secrets are never passed to a logger.

mod traits;
mod console;
mod capture;
mod tracing_logger;

pub use traits::{Logger, LogLevel, NoOpLogger, SharedLogger};
pub use console::ConsoleLogger;
pub use capture::CaptureLogger;
pub use tracing_logger::TracingLogger;
