//! Host capabilities the bridge consumes
//!
//! The host extension framework is reached only through these narrow
//! traits. `MemoryHost` implements all of them in memory for tests and
//! embedders without a UI.

mod context;
mod memory;

pub use context::{HostContext, ToolHost, Severity};
pub use memory::{MemoryHost, Notification};
