//! MCP (Model Context Protocol) transport
//!
//! Uses the official rmcp SDK to spawn the Pencil MCP server and speak
//! MCP over its stdin/stdout. Framing, the `initialize` handshake and
//! request correlation all live in rmcp; this module adapts its service
//! handle to the `ServerLauncher`/`ServerSession` seam.
//!
//! # Example
//!
//! ```rust,ignore
//! use pencil_bridge_core::{RmcpLauncher, ConnectionManager, BridgeSettings};
//!
//! let launcher = RmcpLauncher::new(&BridgeSettings::default(), logger.clone());
//! let connection = ConnectionManager::new(Arc::new(launcher), logger);
//! let result = connection.connect(&binary_path).await?;
//! ```

mod client;

pub use client::{RmcpLauncher, RmcpSession, McpError, McpResult};
