//! Mode controller
//!
//! Owns the mode state, the tool definitions from the most recent
//! successful connect and the captured server instructions. Every failure
//! ends as a host notification; no method returns an error.
//!
//! Only one toggle or reconnect runs at a time. An overlapping request is
//! rejected with a warning instead of interleaving with the running one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::command::BridgeCommand;
use super::prompt::append_instructions;
use crate::config::{BridgeSettings, SettingsFile};
use crate::connection::ConnectionManager;
use crate::error::{BridgeError, BridgeResult};
use crate::host::{HostContext, Severity, ToolHost};
use crate::locator::BinaryLocator;
use crate::logging::Logger;
use crate::mcp::RmcpLauncher;
use crate::tools::{activate_tools, build_bridge_tools, deactivate_tools};
use crate::types::{ConnectionState, ModeState, ToolDefinition};

const NOT_INSTALLED: &str = "Pencil not installed. Install from pencil.dev";
const WIDGET_ACTIVE: &str = "✏️ Pencil";
const WIDGET_CONNECTING: &str = "⏳ Connecting to Pencil...";
const WIDGET_RECONNECTING: &str = "⏳ Reconnecting...";

#[derive(Default)]
struct ControllerState {
    mode: ModeState,
    known_tools: Vec<ToolDefinition>,
    instructions: Option<String>,
}

/// Clears the in-flight flag when the operation ends
struct OperationGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Drives `/pencil`, `/pencil status` and `/pencil reconnect`
pub struct ModeController {
    connection: ConnectionManager,
    locator: BinaryLocator,
    tool_host: Arc<dyn ToolHost>,
    widget_id: String,
    state: RwLock<ControllerState>,
    busy: AtomicBool,
    logger: Arc<dyn Logger>,
}

impl ModeController {
    pub fn new(
        connection: ConnectionManager,
        locator: BinaryLocator,
        tool_host: Arc<dyn ToolHost>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            connection,
            locator,
            tool_host,
            widget_id: BridgeSettings::default().widget_id,
            state: RwLock::new(ControllerState::default()),
            busy: AtomicBool::new(false),
            logger,
        }
    }

    /// Use `id` for the status widget instead of `pencil`
    pub fn with_widget_id(mut self, id: impl Into<String>) -> Self {
        self.widget_id = id.into();
        self
    }

    /// Controller talking to the real server on this machine
    ///
    /// Connection transitions are logged at debug level.
    pub fn from_settings(settings: BridgeSettings, tool_host: Arc<dyn ToolHost>, logger: Arc<dyn Logger>) -> Self {
        let launcher = Arc::new(RmcpLauncher::new(&settings, Arc::clone(&logger)));
        let connection = ConnectionManager::new(launcher, Arc::clone(&logger));

        let observer_logger = Arc::clone(&logger);
        connection.set_observer(Arc::new(move |state: &ConnectionState| {
            observer_logger.debug(&format!("[ModeController] Connection status: {}", state.status()));
        }));

        let widget_id = settings.widget_id.clone();
        let locator = BinaryLocator::for_host(settings, Arc::clone(&logger));
        Self::new(connection, locator, tool_host, logger).with_widget_id(widget_id)
    }

    /// Controller configured from `file`, with environment overrides applied
    ///
    /// A missing file gives the defaults; a malformed one is an error.
    pub fn from_settings_file(
        file: &SettingsFile,
        tool_host: Arc<dyn ToolHost>,
        logger: Arc<dyn Logger>,
    ) -> BridgeResult<Self> {
        let settings = file.load()?.with_process_env();
        Ok(Self::from_settings(settings, tool_host, logger))
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn mode_state(&self) -> ModeState {
        self.state.read().mode.clone()
    }

    /// Instructions captured from the server, if any
    pub fn instructions(&self) -> Option<String> {
        self.state.read().instructions.clone()
    }

    /// Entry point for the `/pencil` command
    pub async fn handle_command(&self, args: &str, ctx: &dyn HostContext) {
        match BridgeCommand::parse(args) {
            BridgeCommand::Toggle => self.toggle(ctx).await,
            BridgeCommand::Status => self.status(ctx),
            BridgeCommand::Reconnect => self.reconnect(ctx).await,
        }
    }

    /// Switch the mode off if active, otherwise connect (when needed) and
    /// expose the bridge tools
    pub async fn toggle(&self, ctx: &dyn HostContext) {
        let _guard = match self.begin(ctx) {
            Ok(guard) => guard,
            Err(_) => return,
        };

        let active = self.state.read().mode.active;
        if active {
            self.deactivate(ctx);
        } else {
            self.activate(ctx).await;
        }
    }

    /// Drop the connection and connect again
    ///
    /// Tools are re-exposed only when the mode was active. If the new
    /// connect fails while active, the mode is switched off so no tool
    /// stays callable against a dead server.
    pub async fn reconnect(&self, ctx: &dyn HostContext) {
        let _guard = match self.begin(ctx) {
            Ok(guard) => guard,
            Err(_) => return,
        };

        self.connection.disconnect().await;
        let was_active = self.state.read().mode.active;

        let binary = match self.locator.locate() {
            Some(binary) => binary,
            None => {
                if was_active {
                    self.deactivate(ctx);
                } else {
                    ctx.set_widget(&self.widget_id, None);
                }
                ctx.notify(NOT_INSTALLED, Severity::Error);
                return;
            }
        };

        self.logger.info("[ModeController] Reconnecting");
        ctx.set_widget(&self.widget_id, Some(vec![WIDGET_RECONNECTING.to_string()]));

        match self.connection.connect(&binary).await {
            Ok(result) => {
                self.register_tools(result.tools, was_active, ctx);
                if !was_active {
                    ctx.set_widget(&self.widget_id, None);
                }
                if let Some(instructions) = result.instructions {
                    self.state.write().instructions = Some(instructions);
                }
                ctx.notify("Pencil reconnected", Severity::Info);
            }
            Err(e) => {
                crate::log_error!(self.logger, "[ModeController] Reconnect failed: {}", e);
                if was_active {
                    self.deactivate(ctx);
                } else {
                    ctx.set_widget(&self.widget_id, None);
                }
                ctx.notify(
                    &format!("Reconnect failed, Pencil mode deactivated: {}", e),
                    Severity::Error,
                );
            }
        }
    }

    /// Send the status report as one info notification
    pub fn status(&self, ctx: &dyn HostContext) {
        ctx.notify(&self.status_lines().join("\n"), Severity::Info);
    }

    /// Lines of the status report
    pub fn status_lines(&self) -> Vec<String> {
        let active = self.state.read().mode.active;
        let connection = self.connection.state();

        let mut lines = vec![
            format!("Mode: {}", if active { "active" } else { "inactive" }),
            format!("Connection: {}", connection.status()),
        ];
        if let Some(info) = connection.server_info() {
            lines.push(format!("Server: {} v{}", info.name, info.version));
        }
        if let Some(names) = connection.tool_names() {
            lines.push(format!("Tools: {} registered", names.len()));
        }
        if let Some(error) = connection.error() {
            lines.push(format!("Error: {}", error));
        }
        lines
    }

    /// System prompt with the server instructions appended
    ///
    /// `None` while the mode is inactive or no instructions were captured;
    /// the prompt is then sent unchanged.
    pub fn augment_system_prompt(&self, system_prompt: &str) -> Option<String> {
        let state = self.state.read();
        if !state.mode.active {
            return None;
        }
        state
            .instructions
            .as_deref()
            .map(|instructions| append_instructions(system_prompt, instructions))
    }

    /// Release the server on host teardown, whatever the mode
    pub async fn shutdown(&self) {
        self.logger.debug("[ModeController] Shutting down");
        self.connection.disconnect().await;
    }

    fn begin(&self, ctx: &dyn HostContext) -> BridgeResult<OperationGuard<'_>> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let err = BridgeError::Busy;
            crate::log_warn!(self.logger, "[ModeController] Rejected overlapping command: {}", err);
            ctx.notify(&err.to_string(), Severity::Warning);
            return Err(err);
        }
        Ok(OperationGuard { busy: &self.busy })
    }

    async fn activate(&self, ctx: &dyn HostContext) {
        let binary = match self.locator.locate() {
            Some(binary) => binary,
            None => {
                ctx.notify(NOT_INSTALLED, Severity::Error);
                return;
            }
        };

        if !self.connection.is_connected() {
            ctx.set_widget(&self.widget_id, Some(vec![WIDGET_CONNECTING.to_string()]));

            match self.connection.connect(&binary).await {
                Ok(result) => {
                    let count = result.tools.len();
                    self.register_tools(result.tools, true, ctx);
                    self.state.write().instructions = result.instructions;
                    self.notify_active(ctx, count);
                }
                Err(e) => {
                    crate::log_error!(self.logger, "[ModeController] Activation failed: {}", e);
                    ctx.set_widget(&self.widget_id, None);
                    ctx.notify(&format!("Pencil MCP server failed to start: {}", e), Severity::Error);
                }
            }
            return;
        }

        // Connected by an earlier reconnect while the mode was off
        let connection = self.connection.state();
        let known_tools = self.state.read().known_tools.clone();
        let tools: Vec<ToolDefinition> = if known_tools.is_empty() {
            connection
                .tool_names()
                .unwrap_or_default()
                .iter()
                .map(ToolDefinition::new)
                .collect()
        } else {
            known_tools
        };
        let count = tools.len();
        self.register_tools(tools, true, ctx);
        self.state.write().instructions = connection.instructions().map(String::from);
        self.notify_active(ctx, count);
    }

    fn deactivate(&self, ctx: &dyn HostContext) {
        let names = self.state.read().mode.tool_names.clone();
        ctx.set_active_tools(deactivate_tools(&ctx.get_active_tools(), &names));
        self.state.write().mode.active = false;

        ctx.set_widget(&self.widget_id, None);
        ctx.notify("Pencil mode deactivated", Severity::Info);
    }

    /// Register `tools` with the host and remember them as the bridge set;
    /// with `expose`, also put them in the active list
    fn register_tools(&self, tools: Vec<ToolDefinition>, expose: bool, ctx: &dyn HostContext) {
        for tool in build_bridge_tools(&tools, &self.connection) {
            self.tool_host.register_tool(tool);
        }

        let names: Vec<String> = tools.iter().map(|t| t.name.clone()).collect();
        let (previous, was_active) = {
            let mut state = self.state.write();
            state.known_tools = tools;
            let previous = std::mem::replace(&mut state.mode.tool_names, names.clone());
            (previous, state.mode.active)
        };

        if !expose {
            return;
        }

        let mut current = ctx.get_active_tools();
        if was_active {
            // Names the server no longer advertises
            let stale: Vec<&String> = previous.iter().filter(|n| !names.contains(n)).collect();
            current = deactivate_tools(&current, &stale);
        }
        ctx.set_active_tools(activate_tools(&current, &names));
        self.state.write().mode.active = true;
        ctx.set_widget(&self.widget_id, Some(vec![WIDGET_ACTIVE.to_string()]));
    }

    fn notify_active(&self, ctx: &dyn HostContext, count: usize) {
        crate::log_info!(self.logger, "[ModeController] Pencil mode active with {} tools", count);
        ctx.notify(
            &format!("Pencil mode active: {} design tools loaded", count),
            Severity::Info,
        );
    }
}

impl std::fmt::Debug for ModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeController")
            .field("mode", &self.state.read().mode)
            .field("connection", &self.connection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockLauncher;
    use crate::host::MemoryHost;
    use crate::locator::{Platform, SystemProbe};
    use crate::logging::NoOpLogger;
    use crate::types::ConnectionStatus;
    use std::path::{Path, PathBuf};

    const BINARY: &str = "/opt/pencil/mcp-server";

    /// Machine where the server is installed at `BINARY` while `installed`
    struct TestSystem {
        installed: Arc<AtomicBool>,
    }

    impl SystemProbe for TestSystem {
        fn platform(&self) -> Platform {
            Platform::Other("test".to_string())
        }

        fn arch(&self) -> String {
            "x64".to_string()
        }

        fn env_var(&self, _key: &str) -> Option<String> {
            None
        }

        fn home_dir(&self) -> Option<PathBuf> {
            None
        }

        fn exists(&self, path: &Path) -> bool {
            self.installed.load(Ordering::SeqCst) && path == Path::new(BINARY)
        }

        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                path.display().to_string(),
            ))
        }
    }

    struct Fixture {
        launcher: Arc<MockLauncher>,
        host: Arc<MemoryHost>,
        installed: Arc<AtomicBool>,
        controller: Arc<ModeController>,
    }

    fn fixture(launcher: MockLauncher) -> Fixture {
        let launcher = Arc::new(launcher);
        let host = Arc::new(MemoryHost::with_active_tools(["read", "bash"]));
        let installed = Arc::new(AtomicBool::new(true));

        let settings = BridgeSettings {
            binary_path: Some(PathBuf::from(BINARY)),
            ..BridgeSettings::default()
        };
        let locator = BinaryLocator::new(
            Arc::new(TestSystem { installed: Arc::clone(&installed) }),
            settings,
            Arc::new(NoOpLogger),
        );
        let connection = ConnectionManager::new(launcher.clone(), Arc::new(NoOpLogger));
        let controller = Arc::new(ModeController::new(
            connection,
            locator,
            host.clone(),
            Arc::new(NoOpLogger),
        ));

        Fixture {
            launcher,
            host,
            installed,
            controller,
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_toggle_activates() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]).with_instructions("Use Pencil tools"));

        f.controller.handle_command("", &*f.host).await;

        assert_eq!(f.host.active_tools(), names(&["read", "bash", "A", "B"]));
        assert_eq!(
            f.controller.mode_state(),
            ModeState { active: true, tool_names: names(&["A", "B"]) }
        );
        assert_eq!(f.host.widget("pencil"), Some(names(&[WIDGET_ACTIVE])));
        assert_eq!(f.host.registered_tool_names(), names(&["A", "B"]));

        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.severity, Severity::Info);
        assert!(notification.message.contains('2'));
        assert_eq!(f.launcher.launches(), vec![PathBuf::from(BINARY)]);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_active_list() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));

        f.controller.toggle(&*f.host).await;
        f.controller.toggle(&*f.host).await;

        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
        assert!(!f.controller.mode_state().active);
        assert!(f.host.widget("pencil").is_none());
        assert_eq!(
            f.host.last_notification().map(|n| n.message),
            Some("Pencil mode deactivated".to_string())
        );
        // The server stays up for the next activation
        assert!(f.controller.connection().is_connected());
    }

    #[tokio::test]
    async fn test_toggle_not_installed() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.installed.store(false, Ordering::SeqCst);

        f.controller.toggle(&*f.host).await;

        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.message, NOT_INSTALLED);
        assert_eq!(notification.severity, Severity::Error);
        assert!(f.launcher.launches().is_empty());
        assert!(!f.controller.mode_state().active);
    }

    #[tokio::test]
    async fn test_toggle_connect_failure() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.launcher.fail_next_launch("spawn EACCES");

        f.controller.toggle(&*f.host).await;

        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.message, "Pencil MCP server failed to start: spawn EACCES");
        assert_eq!(notification.severity, Severity::Error);
        assert!(f.host.widget("pencil").is_none());
        assert!(!f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
    }

    #[tokio::test]
    async fn test_reactivate_reuses_connection() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]).with_instructions("guide"));

        f.controller.toggle(&*f.host).await;
        f.controller.toggle(&*f.host).await;
        f.controller.toggle(&*f.host).await;

        assert_eq!(f.launcher.launches().len(), 1);
        assert_eq!(f.host.active_tools(), names(&["read", "bash", "A", "B"]));
        assert_eq!(f.controller.instructions().as_deref(), Some("guide"));
    }

    #[tokio::test]
    async fn test_activate_after_inactive_reconnect() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));

        f.controller.handle_command("reconnect", &*f.host).await;
        assert!(!f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
        assert!(f.host.widget("pencil").is_none());

        f.controller.handle_command("", &*f.host).await;

        assert_eq!(f.launcher.launches().len(), 1);
        assert_eq!(f.host.active_tools(), names(&["read", "bash", "A", "B"]));
        assert!(f.controller.mode_state().active);
    }

    #[tokio::test]
    async fn test_reconnect_failure_while_active_deactivates() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));
        f.controller.toggle(&*f.host).await;

        f.launcher.fail_next_launch("server crashed");
        f.controller.reconnect(&*f.host).await;

        assert!(!f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
        assert!(f.host.widget("pencil").is_none());

        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(
            notification.message,
            "Reconnect failed, Pencil mode deactivated: server crashed"
        );
    }

    #[tokio::test]
    async fn test_reconnect_not_installed_while_active() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.controller.toggle(&*f.host).await;
        f.installed.store(false, Ordering::SeqCst);

        f.controller.reconnect(&*f.host).await;

        assert!(!f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
        assert_eq!(f.controller.connection().state().status(), ConnectionStatus::Disconnected);
        assert_eq!(
            f.host.last_notification().map(|n| n.message),
            Some(NOT_INSTALLED.to_string())
        );
    }

    #[tokio::test]
    async fn test_reconnect_while_active_swaps_tool_set() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]).with_instructions("old"));
        f.controller.toggle(&*f.host).await;
        let first = f.launcher.last_session().unwrap();

        f.launcher.set_tools(["B", "C"]);
        f.launcher.set_instructions(Some("new".to_string()));
        f.controller.reconnect(&*f.host).await;

        assert!(first.is_closed());
        assert!(f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash", "B", "C"]));
        assert_eq!(f.controller.instructions().as_deref(), Some("new"));
        assert_eq!(f.host.widget("pencil"), Some(names(&[WIDGET_ACTIVE])));
        assert_eq!(
            f.host.last_notification().map(|n| n.message),
            Some("Pencil reconnected".to_string())
        );
    }

    #[tokio::test]
    async fn test_reconnect_keeps_instructions_when_none_reported() {
        let f = fixture(MockLauncher::with_tools(["A"]).with_instructions("keep me"));
        f.controller.toggle(&*f.host).await;

        f.launcher.set_instructions(None);
        f.controller.reconnect(&*f.host).await;

        assert_eq!(f.controller.instructions().as_deref(), Some("keep me"));
    }

    #[tokio::test]
    async fn test_status_report() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));
        f.controller.handle_command("status", &*f.host).await;
        assert_eq!(
            f.host.last_notification().map(|n| n.message),
            Some("Mode: inactive\nConnection: disconnected".to_string())
        );

        f.controller.toggle(&*f.host).await;
        f.controller.handle_command(" status ", &*f.host).await;
        assert_eq!(
            f.controller.status_lines(),
            names(&[
                "Mode: active",
                "Connection: connected",
                "Server: pencil-mock v0.0.0",
                "Tools: 2 registered",
            ])
        );
        assert_eq!(f.host.last_notification().map(|n| n.severity), Some(Severity::Info));
    }

    #[tokio::test]
    async fn test_status_after_lost_connection() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.controller.toggle(&*f.host).await;
        f.launcher.last_session().unwrap().simulate_exit("exited");

        assert_eq!(
            f.controller.status_lines(),
            names(&["Mode: active", "Connection: error", "Error: Pencil connection lost"])
        );
    }

    #[tokio::test]
    async fn test_prompt_augmentation() {
        let f = fixture(MockLauncher::with_tools(["A"]).with_instructions("Design carefully."));
        assert_eq!(f.controller.augment_system_prompt("base"), None);

        f.controller.toggle(&*f.host).await;
        assert_eq!(
            f.controller.augment_system_prompt("base").as_deref(),
            Some("base\n\nDesign carefully.")
        );

        f.controller.toggle(&*f.host).await;
        assert_eq!(f.controller.augment_system_prompt("base"), None);
    }

    #[tokio::test]
    async fn test_no_augmentation_without_instructions() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.controller.toggle(&*f.host).await;
        assert!(f.controller.mode_state().active);
        assert_eq!(f.controller.augment_system_prompt("base"), None);
    }

    #[tokio::test]
    async fn test_overlapping_toggle_is_rejected() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));
        let gate = f.launcher.hold_launches();

        let controller = Arc::clone(&f.controller);
        let host = Arc::clone(&f.host);
        let first = tokio::spawn(async move { controller.toggle(&*host).await });

        while f.launcher.launches().is_empty() {
            tokio::task::yield_now().await;
        }

        f.controller.handle_command("", &*f.host).await;
        f.controller.handle_command("reconnect", &*f.host).await;
        let busy = f.host.last_notification().unwrap();
        assert_eq!(busy.severity, Severity::Warning);
        assert_eq!(busy.message, "Pencil is busy, try again in a moment");

        // Status is never blocked
        f.controller.handle_command("status", &*f.host).await;
        assert!(f
            .host
            .last_notification()
            .unwrap()
            .message
            .contains("Connection: connecting"));

        gate.notify_one();
        first.await.unwrap();

        assert_eq!(f.launcher.launches().len(), 1);
        assert!(f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash", "A", "B"]));
    }

    #[tokio::test]
    async fn test_shutdown_disconnects() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.controller.toggle(&*f.host).await;
        let session = f.launcher.last_session().unwrap();

        f.controller.shutdown().await;

        assert!(session.is_closed());
        assert_eq!(f.controller.connection().state(), ConnectionState::disconnected());
    }

    #[tokio::test]
    async fn test_registered_tool_forwards_to_server() {
        let f = fixture(MockLauncher::with_tools(["get_editor_state"]));
        f.controller.toggle(&*f.host).await;

        let tool = f.host.registered_tool("get_editor_state").unwrap();
        let result = tool
            .execute(crate::tools::ToolInvocation::new("call-1", serde_json::Map::new()))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(f.launcher.last_session().unwrap().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_activate_on_existing_connection_without_cached_tools() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));
        f.controller.connection().connect(Path::new(BINARY)).await.unwrap();

        f.controller.toggle(&*f.host).await;

        assert_eq!(f.launcher.launches().len(), 1);
        assert_eq!(f.host.active_tools(), names(&["read", "bash", "A", "B"]));
        assert_eq!(f.host.registered_tool_names(), names(&["A", "B"]));
        assert!(f.host.registered_tool("A").unwrap().parameters.is_empty());
        assert!(f.host.registered_tool("B").unwrap().parameters.is_empty());
        assert!(f.controller.mode_state().active);
    }

    #[tokio::test]
    async fn test_reconnect_failure_while_inactive() {
        let f = fixture(MockLauncher::with_tools(["A", "B"]));
        f.launcher.fail_next_launch("boom");

        f.controller.reconnect(&*f.host).await;

        assert!(!f.controller.mode_state().active);
        assert!(f.host.widget("pencil").is_none());
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));

        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Reconnect failed, Pencil mode deactivated: boom");
        assert_eq!(f.host.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_reconnect_not_installed_while_inactive_clears_widget() {
        let f = fixture(MockLauncher::with_tools(["A"]));
        f.host.set_widget("pencil", Some(names(&[WIDGET_RECONNECTING])));
        f.installed.store(false, Ordering::SeqCst);

        f.controller.reconnect(&*f.host).await;

        assert!(f.host.widget("pencil").is_none());
        assert!(!f.controller.mode_state().active);
        assert_eq!(f.host.active_tools(), names(&["read", "bash"]));
        let notification = f.host.last_notification().unwrap();
        assert_eq!(notification.message, NOT_INSTALLED);
        assert_eq!(notification.severity, Severity::Error);
    }

    #[test]
    fn test_from_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "widget_id: design\n").unwrap();

        let controller = ModeController::from_settings_file(
            &SettingsFile::new(&path),
            Arc::new(MemoryHost::new()),
            Arc::new(NoOpLogger),
        )
        .unwrap();

        assert_eq!(controller.widget_id, "design");
        assert!(!controller.mode_state().active);
    }

    #[test]
    fn test_from_malformed_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "launch_args: [unterminated").unwrap();

        let result = ModeController::from_settings_file(
            &SettingsFile::new(&path),
            Arc::new(MemoryHost::new()),
            Arc::new(NoOpLogger),
        );

        assert!(matches!(result, Err(BridgeError::Config(_))));
    }
}
