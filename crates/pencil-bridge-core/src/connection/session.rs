//! Transport seam between the connection manager and the MCP SDK

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::BridgeResult;
use crate::types::{ServerInfo, ToolCallOutput, ToolDefinition};

/// Called at most once when a session ends without being asked to
/// (process exit, stream closed). The argument describes why.
pub type CloseHandler = Box<dyn FnOnce(String) + Send + 'static>;

/// Starts server processes
#[async_trait]
pub trait ServerLauncher: Send + Sync {
    /// Spawn the server at `binary` and complete the protocol handshake
    async fn launch(&self, binary: &Path, on_close: CloseHandler) -> BridgeResult<Arc<dyn ServerSession>>;
}

/// One live server connection
#[async_trait]
pub trait ServerSession: Send + Sync {
    /// Identity reported during the handshake
    fn server_info(&self) -> Option<ServerInfo>;

    /// Usage instructions reported during the handshake
    fn instructions(&self) -> Option<String>;

    async fn list_tools(&self) -> BridgeResult<Vec<ToolDefinition>>;

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> BridgeResult<ToolCallOutput>;

    /// Stop the server; calling it again is a no-op
    async fn close(&self) -> BridgeResult<()>;
}
