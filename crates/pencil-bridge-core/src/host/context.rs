//! Host capability traits

use serde::{Deserialize, Serialize};

use crate::tools::BridgeTool;

/// Severity of a one-shot user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-command host context: UI calls plus the active-tool list
///
/// The bridge does not own the active-tool list; it only adds and removes
/// its own names.
pub trait HostContext: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);

    /// Show `lines` under `id`, or clear the widget with `None`
    fn set_widget(&self, id: &str, lines: Option<Vec<String>>);

    fn get_active_tools(&self) -> Vec<String>;

    fn set_active_tools(&self, names: Vec<String>);
}

/// Host tool registry
///
/// Registering a name that already exists replaces the previous tool.
pub trait ToolHost: Send + Sync {
    fn register_tool(&self, tool: BridgeTool);
}
