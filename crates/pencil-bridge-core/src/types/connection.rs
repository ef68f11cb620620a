//! Connection status and state snapshots

use serde::{Deserialize, Serialize};

/// Connection status for the Pencil MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server identity reported during the handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Snapshot of the connection
///
/// Only the constructors below create values, so the optional fields
/// always match the status: `server_info`, `tool_names` and `instructions`
/// exist only while connected, `error` only in the error state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    status: ConnectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    server_info: Option<ServerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connecting() -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            ..Self::default()
        }
    }

    pub fn connected(
        server_info: Option<ServerInfo>,
        tool_names: Vec<String>,
        instructions: Option<String>,
    ) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            server_info,
            tool_names: Some(tool_names),
            instructions,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatus::Error,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    pub fn tool_names(&self) -> Option<&[String]> {
        self.tool_names.as_deref()
    }

    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_follow_status() {
        let connecting = ConnectionState::connecting();
        assert_eq!(connecting.status(), ConnectionStatus::Connecting);
        assert!(connecting.server_info().is_none());
        assert!(connecting.tool_names().is_none());
        assert!(connecting.error().is_none());

        let failed = ConnectionState::failed("boom");
        assert_eq!(failed.status(), ConnectionStatus::Error);
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.instructions().is_none());

        let connected = ConnectionState::connected(
            Some(ServerInfo::new("pencil", "1.2.0")),
            vec!["batch_design".to_string()],
            Some("Use the design tools".to_string()),
        );
        assert!(connected.is_connected());
        assert!(connected.error().is_none());
        assert_eq!(connected.tool_names(), Some(&["batch_design".to_string()][..]));
    }

    #[test]
    fn test_serializes_like_host_snapshot() {
        let state = ConnectionState::connected(
            Some(ServerInfo::new("pencil", "1.2.0")),
            vec!["get_screenshot".to_string()],
            None,
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "connected",
                "serverInfo": { "name": "pencil", "version": "1.2.0" },
                "toolNames": ["get_screenshot"],
            })
        );
    }
}
