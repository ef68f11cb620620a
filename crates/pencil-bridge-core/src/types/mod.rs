//! Core types shared across the bridge
//!
//! This module contains the connection and mode state, tool definitions
//! and the cancellation token handed to tool executions.

mod connection;
mod mode;
mod tool;
mod cancellation;

pub use connection::{ConnectionState, ConnectionStatus, ServerInfo};
pub use mode::ModeState;
pub use tool::{ToolDefinition, ToolCallOutput};
pub use cancellation::CancellationToken;
