//! Pencil Bridge Core
//!
//! Connects a host agent's extension framework to the Pencil MCP server,
//! a subprocess speaking the Model Context Protocol over stdio.
//! The crate keeps three pieces of state consistent:
//! - the subprocess connection status (`connection::ConnectionManager`)
//! - the tool definitions the server advertised
//! - the subset of those tools exposed in the host's active tool list
//!
//! ## Mode toggling
//!
//! The `mode` module drives everything from the three user-facing
//! commands (`/pencil`, `/pencil status`, `/pencil reconnect`):
//!
//! ```rust,ignore
//! use pencil_bridge_core::{ModeController, BridgeSettings, BinaryLocator};
//!
//! let controller = ModeController::new(connection, locator, tool_host, logger);
//!
//! // `/pencil` toggles, `/pencil status` reports, `/pencil reconnect` reconnects
//! controller.handle_command(args, &ctx).await;
//!
//! // Before each model request
//! if let Some(prompt) = controller.augment_system_prompt(&system_prompt) {
//!     system_prompt = prompt;
//! }
//! ```

pub mod types;
pub mod error;
pub mod logging;
pub mod config;
pub mod locator;
pub mod mcp;
pub mod connection;
pub mod tools;
pub mod host;
pub mod mode;

// Re-export commonly used types
pub use types::{
    ConnectionState, ConnectionStatus, ServerInfo, ModeState,
    ToolDefinition, ToolCallOutput, CancellationToken,
};

pub use error::{BridgeError, BridgeResult};

pub use logging::{Logger, NoOpLogger, ConsoleLogger, FileLogger, LogLevel};

pub use config::{BridgeSettings, SettingsFile, CompanionConfig, ConfigError, ConfigResult};

pub use locator::{BinaryLocator, SystemProbe, HostSystem, Platform};

pub use connection::{
    ConnectionManager, ConnectResult, StatusObserver,
    ServerLauncher, ServerSession, CloseHandler,
    MockLauncher, MockSession,
};

pub use mcp::{McpError, McpResult, RmcpLauncher};

pub use tools::{activate_tools, deactivate_tools, build_bridge_tools, BridgeTool, ToolInvocation, HostToolResult};

pub use host::{HostContext, ToolHost, Severity, MemoryHost, Notification};

pub use mode::{ModeController, BridgeCommand, append_instructions};
