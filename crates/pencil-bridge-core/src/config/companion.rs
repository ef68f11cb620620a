//! Companion MCP host configuration (JSON)
//!
//! Another MCP host keeps its server list in `~/.claude.json`:
//!
//! ```json
//! { "mcpServers": { "pencil": { "command": "/path/to/mcp-server", "args": [] } } }
//! ```
//!
//! Only `command` matters here. Everything else in the file is ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::ConfigResult;

/// One server entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanionServer {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Parsed companion config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanionConfig {
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: HashMap<String, CompanionServer>,
}

impl CompanionConfig {
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Configured command for `server`, if any
    pub fn command_for(&self, server: &str) -> Option<&str> {
        self.mcp_servers
            .get(server)
            .and_then(|s| s.command.as_deref())
            .filter(|c| !c.is_empty())
    }
}
