//! Host-shaped tools backed by the Pencil MCP server
//!
//! Every `BridgeTool` forwards its execution to `ConnectionManager::call`;
//! the host never talks to the server directly.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::connection::ConnectionManager;
use crate::error::{BridgeError, BridgeResult};
use crate::types::{CancellationToken, ToolDefinition};

/// A tool as registered with the host
#[derive(Debug, Clone)]
pub struct BridgeTool {
    pub name: String,
    /// Display label; same as the name
    pub label: String,
    pub description: String,
    /// JSON Schema for the parameters, as advertised by the server
    pub parameters: Map<String, Value>,
    connection: ConnectionManager,
}

/// One host-initiated call of a bridge tool
#[derive(Debug, Clone, Default)]
pub struct ToolInvocation {
    pub call_id: String,
    pub params: Map<String, Value>,
    pub cancel: CancellationToken,
}

impl ToolInvocation {
    pub fn new(call_id: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            call_id: call_id.into(),
            params,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Result handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostToolResult {
    pub content: Vec<Value>,
    pub is_error: bool,
    /// Always present, currently always empty
    pub details: Map<String, Value>,
}

impl BridgeTool {
    pub fn new(definition: &ToolDefinition, connection: ConnectionManager) -> Self {
        Self {
            name: definition.name.clone(),
            label: definition.name.clone(),
            description: definition.description.clone().unwrap_or_default(),
            parameters: definition.input_schema.clone(),
            connection,
        }
    }

    /// Forward the invocation to the server
    ///
    /// Fails with `NotConnected` while the server is down and with
    /// `Cancelled` if the token fires before the server answers. A tool
    /// error reported by the server is a successful result with
    /// `is_error` set.
    pub async fn execute(&self, invocation: ToolInvocation) -> BridgeResult<HostToolResult> {
        let ToolInvocation { params, cancel, .. } = invocation;
        if cancel.is_cancelled() {
            return Err(BridgeError::Cancelled);
        }

        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BridgeError::Cancelled),
            output = self.connection.call(&self.name, params) => output?,
        };

        Ok(HostToolResult {
            content: output.content,
            is_error: output.is_error.unwrap_or(false),
            details: Map::new(),
        })
    }
}

/// Adapt every server tool definition into a host tool bound to `connection`
pub fn build_bridge_tools(definitions: &[ToolDefinition], connection: &ConnectionManager) -> Vec<BridgeTool> {
    definitions
        .iter()
        .map(|definition| BridgeTool::new(definition, connection.clone()))
        .collect()
}
