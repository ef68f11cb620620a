//! Crate-level error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::mcp::McpError;

/// Errors surfaced by the connection and tool layers
///
/// `BinaryLocator` never produces one of these: "not found" is an
/// `Option::None`, not a failure.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A tool call was attempted while the server is not connected
    #[error("Not connected to Pencil MCP server")]
    NotConnected,

    /// Spawning, handshaking with, or enumerating the server failed
    #[error("{0}")]
    ConnectFailed(String),

    /// The MCP transport reported an error
    #[error(transparent)]
    Transport(#[from] McpError),

    /// The invocation was cancelled by the host
    #[error("Tool call cancelled")]
    Cancelled,

    /// Another toggle or reconnect is still running
    #[error("Pencil is busy, try again in a moment")]
    Busy,

    /// Settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Create a connect failure error
    pub fn connect_failed(message: impl Into<String>) -> Self {
        Self::ConnectFailed(message.into())
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
