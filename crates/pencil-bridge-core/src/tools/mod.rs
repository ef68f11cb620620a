//! Bridge tools
//!
//! Two halves:
//! - `sync`: the pure merge that adds or removes bridge tool names in the
//!   host's active-tool list without touching anything else
//! - `registrar`: the adapter that turns server tool definitions into
//!   host tools whose execution is forwarded to the connection
//!
//! ```text
//! ConnectionManager::connect ──► Vec<ToolDefinition>
//!                                   │ build_bridge_tools
//!                                   ▼
//!                            Vec<BridgeTool> ──► ToolHost::register_tool
//!                                   │
//!  host active list ──► activate_tools / deactivate_tools ──► new list
//! ```

mod sync;
mod registrar;

pub use sync::{activate_tools, deactivate_tools};
pub use registrar::{build_bridge_tools, BridgeTool, ToolInvocation, HostToolResult};
