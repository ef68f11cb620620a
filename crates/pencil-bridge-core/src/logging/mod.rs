//! Logging abstractions
//!
//! The bridge runs inside a host process whose stdout usually belongs to
//! the host UI, so components log through the `Logger` trait and the
//! embedder chooses where lines go.

mod traits;
mod noop;
mod console;
mod file;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use file::{FileLogger, LogLevel};
