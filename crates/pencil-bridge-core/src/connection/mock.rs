//! Mock launcher for testing
//!
//! Serves a fixed tool list without spawning anything. Failures can be
//! queued per launch, and the last session can simulate the server
//! exiting on its own.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use tokio::sync::Notify;

use super::session::{CloseHandler, ServerLauncher, ServerSession};
use crate::error::{BridgeError, BridgeResult};
use crate::mcp::McpError;
use crate::types::{ServerInfo, ToolCallOutput, ToolDefinition};

#[derive(Debug, Clone)]
enum MockFailure {
    Launch(String),
    ListTools(String),
}

/// What the next session will look like
#[derive(Clone)]
struct MockServer {
    server_info: Option<ServerInfo>,
    tools: Vec<ToolDefinition>,
    instructions: Option<String>,
    response: ToolCallOutput,
    fail_close: bool,
    hang_calls: bool,
}

/// Launcher that hands out `MockSession`s
pub struct MockLauncher {
    server: Mutex<MockServer>,
    failures: Mutex<VecDeque<MockFailure>>,
    launches: Mutex<Vec<PathBuf>>,
    sessions: Mutex<Vec<Arc<MockSession>>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockLauncher {
    /// Server advertising `tools` with empty object schemas
    pub fn with_tools<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_tool_definitions(names.into_iter().map(ToolDefinition::new).collect())
    }

    pub fn with_tool_definitions(tools: Vec<ToolDefinition>) -> Self {
        Self {
            server: Mutex::new(MockServer {
                server_info: Some(ServerInfo::new("pencil-mock", "0.0.0")),
                tools,
                instructions: None,
                response: ToolCallOutput::text("ok"),
                fail_close: false,
                hang_calls: false,
            }),
            failures: Mutex::new(VecDeque::new()),
            launches: Mutex::new(Vec::new()),
            sessions: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    pub fn with_instructions(self, instructions: impl Into<String>) -> Self {
        self.server.lock().instructions = Some(instructions.into());
        self
    }

    /// Sessions report an error from `close`
    pub fn failing_close(self) -> Self {
        self.server.lock().fail_close = true;
        self
    }

    /// Tool calls never complete
    pub fn hanging_calls(self) -> Self {
        self.server.lock().hang_calls = true;
        self
    }

    /// Replace the tool list served by later sessions
    pub fn set_tools<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.server.lock().tools = names.into_iter().map(ToolDefinition::new).collect();
    }

    pub fn set_instructions(&self, instructions: Option<String>) {
        self.server.lock().instructions = instructions;
    }

    /// Result returned by every tool call of later sessions
    pub fn respond_with(&self, output: ToolCallOutput) {
        self.server.lock().response = output;
    }

    /// Make the next launch fail before a session exists
    pub fn fail_next_launch(&self, message: impl Into<String>) {
        self.failures.lock().push_back(MockFailure::Launch(message.into()));
    }

    /// Make the next launch succeed but its tool listing fail
    pub fn fail_next_list_tools(&self, message: impl Into<String>) {
        self.failures.lock().push_back(MockFailure::ListTools(message.into()));
    }

    /// Block launches until the returned `Notify` is signalled
    pub fn hold_launches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    /// Paths passed to `launch`, in order
    pub fn launches(&self) -> Vec<PathBuf> {
        self.launches.lock().clone()
    }

    pub fn last_session(&self) -> Option<Arc<MockSession>> {
        self.sessions.lock().last().cloned()
    }
}

#[async_trait]
impl ServerLauncher for MockLauncher {
    async fn launch(&self, binary: &Path, on_close: CloseHandler) -> BridgeResult<Arc<dyn ServerSession>> {
        self.launches.lock().push(binary.to_path_buf());

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self.failures.lock().pop_front();
        let list_failure = match failure {
            Some(MockFailure::Launch(message)) => return Err(BridgeError::connect_failed(message)),
            Some(MockFailure::ListTools(message)) => Some(message),
            None => None,
        };

        let session = Arc::new(MockSession {
            server: self.server.lock().clone(),
            list_failure,
            calls: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
            on_close: Mutex::new(Some(on_close)),
        });
        self.sessions.lock().push(Arc::clone(&session));
        Ok(session)
    }
}

/// Session handed out by `MockLauncher`
pub struct MockSession {
    server: MockServer,
    list_failure: Option<String>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
    closed: AtomicBool,
    on_close: Mutex<Option<CloseHandler>>,
}

impl MockSession {
    /// Tool calls received, in order
    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Pretend the server process went away
    pub fn simulate_exit(&self, reason: &str) {
        self.closed.store(true, Ordering::SeqCst);
        let handler = self.on_close.lock().take();
        if let Some(handler) = handler {
            handler(reason.to_string());
        }
    }
}

#[async_trait]
impl ServerSession for MockSession {
    fn server_info(&self) -> Option<ServerInfo> {
        self.server.server_info.clone()
    }

    fn instructions(&self) -> Option<String> {
        self.server.instructions.clone()
    }

    async fn list_tools(&self) -> BridgeResult<Vec<ToolDefinition>> {
        match &self.list_failure {
            Some(message) => Err(McpError::Protocol(message.clone()).into()),
            None => Ok(self.server.tools.clone()),
        }
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> BridgeResult<ToolCallOutput> {
        if self.is_closed() {
            return Err(McpError::ToolCallFailed("session closed".to_string()).into());
        }
        self.calls.lock().push((name.to_string(), arguments));
        if self.server.hang_calls {
            std::future::pending::<()>().await;
        }
        Ok(self.server.response.clone())
    }

    async fn close(&self) -> BridgeResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        // A requested close does not count as an unexpected exit
        self.on_close.lock().take();
        if self.server.fail_close {
            return Err(McpError::Protocol("close failed".to_string()).into());
        }
        Ok(())
    }
}
