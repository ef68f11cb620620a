//! Connection manager
//!
//! State machine over `disconnected | connecting | connected | error`.
//! Every transition is pushed to the registered observer with the full
//! new snapshot.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::{Map, Value};

use super::session::{CloseHandler, ServerLauncher, ServerSession};
use crate::error::{BridgeError, BridgeResult};
use crate::logging::Logger;
use crate::types::{ConnectionState, ToolCallOutput, ToolDefinition};

/// Error recorded when a connected session ends on its own
pub const CONNECTION_LOST: &str = "Pencil connection lost";

/// Receives every state snapshot. Must not call back into the manager.
pub type StatusObserver = Arc<dyn Fn(&ConnectionState) + Send + Sync>;

/// Tools and instructions discovered by a successful connect
#[derive(Debug, Clone, Default)]
pub struct ConnectResult {
    pub tools: Vec<ToolDefinition>,
    pub instructions: Option<String>,
}

/// Owns the server session and its observable state
///
/// Cheap to clone; clones share the same connection.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

struct Inner {
    launcher: Arc<dyn ServerLauncher>,
    state: RwLock<ConnectionState>,
    session: RwLock<Option<Arc<dyn ServerSession>>>,
    /// Bumped by every connect and disconnect; close notifications from
    /// older sessions compare against it and are dropped.
    generation: AtomicU64,
    observer: RwLock<Option<StatusObserver>>,
    logger: Arc<dyn Logger>,
}

impl ConnectionManager {
    pub fn new(launcher: Arc<dyn ServerLauncher>, logger: Arc<dyn Logger>) -> Self {
        Self {
            inner: Arc::new(Inner {
                launcher,
                state: RwLock::new(ConnectionState::disconnected()),
                session: RwLock::new(None),
                generation: AtomicU64::new(0),
                observer: RwLock::new(None),
                logger,
            }),
        }
    }

    /// Register the status observer, replacing any previous one
    pub fn set_observer(&self, observer: StatusObserver) {
        *self.inner.observer.write() = Some(observer);
    }

    pub fn with_observer(self, observer: StatusObserver) -> Self {
        self.set_observer(observer);
        self
    }

    /// Current state snapshot
    pub fn state(&self) -> ConnectionState {
        self.inner.state.read().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.state.read().is_connected()
    }

    /// Launch the server at `binary`, handshake and enumerate its tools
    ///
    /// Any session left from an earlier connect is closed first. On
    /// failure the state moves to `error` and the error is returned.
    pub async fn connect(&self, binary: &Path) -> BridgeResult<ConnectResult> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.transition(ConnectionState::connecting());

        let previous = self.inner.session.write().take();
        if let Some(previous) = previous {
            self.inner.close_quietly(previous).await;
        }

        self.inner.logger.info(&format!("[ConnectionManager] Connecting to {}", binary.display()));

        let on_close = Inner::close_handler(Arc::downgrade(&self.inner), generation);
        let session = match self.inner.launcher.launch(binary, on_close).await {
            Ok(session) => session,
            Err(e) => return Err(self.inner.fail(generation, e)),
        };

        let tools = match session.list_tools().await {
            Ok(tools) => tools,
            Err(e) => {
                self.inner.close_quietly(session).await;
                return Err(self.inner.fail(generation, e));
            }
        };
        let instructions = session.instructions();

        if self.inner.generation.load(Ordering::SeqCst) != generation {
            // A disconnect or newer connect ran while this one was suspended
            self.inner.close_quietly(session).await;
            return Err(BridgeError::connect_failed("Connection attempt superseded"));
        }

        self.inner.logger.info(&format!(
            "[ConnectionManager] Connected, {} tools available",
            tools.len()
        ));

        *self.inner.session.write() = Some(Arc::clone(&session));
        self.inner.transition(ConnectionState::connected(
            session.server_info(),
            tools.iter().map(|t| t.name.clone()).collect(),
            instructions.clone(),
        ));

        Ok(ConnectResult { tools, instructions })
    }

    /// Forward a tool call to the server
    ///
    /// Fails with `NotConnected` without touching the transport unless the
    /// status is `connected`. Tool-level errors come back in the output and
    /// leave the status alone.
    pub async fn call(&self, name: &str, arguments: Map<String, Value>) -> BridgeResult<ToolCallOutput> {
        let session = {
            if !self.inner.state.read().is_connected() {
                return Err(BridgeError::NotConnected);
            }
            self.inner.session.read().clone().ok_or(BridgeError::NotConnected)?
        };

        session.call_tool(name, arguments).await
    }

    /// Close the session (if any) and move to `disconnected`
    ///
    /// Safe in every state; close errors are logged and dropped.
    pub async fn disconnect(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        let session = self.inner.session.write().take();
        if let Some(session) = session {
            self.inner.logger.info("[ConnectionManager] Disconnecting");
            self.inner.close_quietly(session).await;
        }

        self.inner.transition(ConnectionState::disconnected());
    }
}

impl Inner {
    fn transition(&self, state: ConnectionState) {
        *self.state.write() = state.clone();
        let observer = self.observer.read().clone();
        if let Some(observer) = observer {
            observer(&state);
        }
    }

    /// Record a connect failure and hand the error back to the caller
    fn fail(&self, generation: u64, error: BridgeError) -> BridgeError {
        self.logger.error(&format!("[ConnectionManager] Connect failed: {}", error));
        if self.generation.load(Ordering::SeqCst) == generation {
            self.transition(ConnectionState::failed(format!("Failed to connect: {}", error)));
        }
        error
    }

    async fn close_quietly(&self, session: Arc<dyn ServerSession>) {
        if let Err(e) = session.close().await {
            self.logger.debug(&format!("[ConnectionManager] Ignoring close error: {}", e));
        }
    }

    fn close_handler(inner: Weak<Inner>, generation: u64) -> CloseHandler {
        Box::new(move |reason: String| {
            if let Some(inner) = inner.upgrade() {
                inner.on_session_closed(generation, &reason);
            }
        })
    }

    fn on_session_closed(&self, generation: u64, reason: &str) {
        if self.generation.load(Ordering::SeqCst) != generation || !self.state.read().is_connected() {
            self.logger.debug(&format!("[ConnectionManager] Stale session closed: {}", reason));
            return;
        }

        self.logger.warn(&format!("[ConnectionManager] Connection lost: {}", reason));
        self.session.write().take();
        self.transition(ConnectionState::failed(CONNECTION_LOST));
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("state", &*self.inner.state.read())
            .finish()
    }
}
