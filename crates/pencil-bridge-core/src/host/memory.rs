//! In-memory host

use std::collections::HashMap;

use parking_lot::RwLock;

use super::context::{HostContext, Severity, ToolHost};
use crate::tools::BridgeTool;

/// A notification as received by `MemoryHost`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Records everything the bridge asks of the host
#[derive(Default)]
pub struct MemoryHost {
    notifications: RwLock<Vec<Notification>>,
    widgets: RwLock<HashMap<String, Vec<String>>>,
    active_tools: RwLock<Vec<String>>,
    tools: RwLock<Vec<BridgeTool>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose active-tool list starts as `names`
    pub fn with_active_tools<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let host = Self::new();
        *host.active_tools.write() = names.into_iter().map(Into::into).collect();
        host
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.notifications.read().last().cloned()
    }

    /// Lines currently shown under `id`
    pub fn widget(&self, id: &str) -> Option<Vec<String>> {
        self.widgets.read().get(id).cloned()
    }

    pub fn active_tools(&self) -> Vec<String> {
        self.active_tools.read().clone()
    }

    pub fn registered_tool(&self, name: &str) -> Option<BridgeTool> {
        self.tools.read().iter().find(|t| t.name == name).cloned()
    }

    pub fn registered_tool_names(&self) -> Vec<String> {
        self.tools.read().iter().map(|t| t.name.clone()).collect()
    }
}

impl HostContext for MemoryHost {
    fn notify(&self, message: &str, severity: Severity) {
        self.notifications.write().push(Notification {
            message: message.to_string(),
            severity,
        });
    }

    fn set_widget(&self, id: &str, lines: Option<Vec<String>>) {
        let mut widgets = self.widgets.write();
        match lines {
            Some(lines) => {
                widgets.insert(id.to_string(), lines);
            }
            None => {
                widgets.remove(id);
            }
        }
    }

    fn get_active_tools(&self) -> Vec<String> {
        self.active_tools()
    }

    fn set_active_tools(&self, names: Vec<String>) {
        *self.active_tools.write() = names;
    }
}

impl ToolHost for MemoryHost {
    fn register_tool(&self, tool: BridgeTool) {
        let mut tools = self.tools.write();
        match tools.iter_mut().find(|t| t.name == tool.name) {
            Some(existing) => *existing = tool,
            None => tools.push(tool),
        }
    }
}
