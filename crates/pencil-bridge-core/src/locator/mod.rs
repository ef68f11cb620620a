//! Pencil MCP server binary discovery
//!
//! Probes the platform's install locations first, then falls back to the
//! companion config file. "Not found" is a normal outcome (`None`).

mod probe;
mod platform;
mod binary;

pub use probe::{SystemProbe, HostSystem};
pub use platform::{Platform, candidate_paths};
pub use binary::BinaryLocator;
