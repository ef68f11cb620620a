//! rmcp-backed server sessions

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rmcp::{
    ServiceExt,
    model::{CallToolRequestParams, ClientCapabilities, ClientInfo, Implementation, Tool},
    service::{Peer, RunningServiceCancellationToken},
    transport::TokioChildProcess,
    RoleClient,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::process::Command;

use crate::config::BridgeSettings;
use crate::connection::{CloseHandler, ServerLauncher, ServerSession};
use crate::error::BridgeResult;
use crate::logging::Logger;
use crate::types::{ServerInfo, ToolCallOutput, ToolDefinition};

/// MCP transport errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

/// Spawns the Pencil MCP server as a child process
pub struct RmcpLauncher {
    client_name: String,
    args: Vec<String>,
    logger: Arc<dyn Logger>,
}

impl RmcpLauncher {
    pub fn new(settings: &BridgeSettings, logger: Arc<dyn Logger>) -> Self {
        Self {
            client_name: settings.client_name.clone(),
            args: settings.launch_args.clone(),
            logger,
        }
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: self.client_name.clone(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        }
    }
}

#[async_trait]
impl ServerLauncher for RmcpLauncher {
    async fn launch(&self, binary: &Path, on_close: CloseHandler) -> BridgeResult<Arc<dyn ServerSession>> {
        let session = RmcpSession::spawn(
            binary,
            &self.args,
            self.client_info(),
            on_close,
            Arc::clone(&self.logger),
        )
        .await?;
        Ok(Arc::new(session))
    }
}

/// Live connection to one server process
///
/// The rmcp service runs on a background task that owns it; the task
/// invokes the close handler when the service stops for any reason.
pub struct RmcpSession {
    peer: Peer<RoleClient>,
    cancel: Mutex<Option<RunningServiceCancellationToken>>,
    logger: Arc<dyn Logger>,
}

impl RmcpSession {
    /// Start `binary` with `args` and complete the `initialize` handshake
    pub async fn spawn(
        binary: &Path,
        args: &[String],
        client_info: ClientInfo,
        on_close: CloseHandler,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Starting {} {}", binary.display(), args.join(" ")));

        let mut command = Command::new(binary);
        command.args(args);

        let transport = TokioChildProcess::new(command)
            .map_err(|e| McpError::SpawnFailed(e.to_string()))?;

        let service = client_info
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        let peer = service.peer().clone();
        let cancel = service.cancellation_token();

        let watcher_logger = Arc::clone(&logger);
        tokio::spawn(async move {
            let reason = match service.waiting().await {
                Ok(reason) => format!("{:?}", reason),
                Err(e) => e.to_string(),
            };
            watcher_logger.debug(&format!("[McpClient] Service stopped: {}", reason));
            on_close(reason);
        });

        Ok(Self {
            peer,
            cancel: Mutex::new(Some(cancel)),
            logger,
        })
    }
}

impl From<Tool> for ToolDefinition {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.map(|d| d.to_string()),
            input_schema: tool.input_schema.as_ref().clone(),
        }
    }
}

#[async_trait]
impl ServerSession for RmcpSession {
    fn server_info(&self) -> Option<ServerInfo> {
        self.peer
            .peer_info()
            .map(|info| ServerInfo::new(info.server_info.name.clone(), info.server_info.version.clone()))
    }

    fn instructions(&self) -> Option<String> {
        self.peer.peer_info().and_then(|info| info.instructions.clone())
    }

    async fn list_tools(&self) -> BridgeResult<Vec<ToolDefinition>> {
        let result = self
            .peer
            .list_tools(Default::default())
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools.into_iter().map(ToolDefinition::from).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> BridgeResult<ToolCallOutput> {
        self.logger.debug(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let result = self
            .peer
            .call_tool(params)
            .await
            .map_err(|e| McpError::ToolCallFailed(e.to_string()))?;

        let content = result
            .content
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| McpError::Protocol(e.to_string()))?;

        Ok(ToolCallOutput {
            content,
            is_error: result.is_error,
        })
    }

    async fn close(&self) -> BridgeResult<()> {
        if let Some(cancel) = self.cancel.lock().take() {
            self.logger.info("[McpClient] Closing connection");
            cancel.cancel();
        }
        Ok(())
    }
}
