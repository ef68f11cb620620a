//! Bridge settings (YAML)
//!
//! Read from `~/.config/pencil-bridge/config.yaml` (the platform config
//! directory). Every field is optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigResult;
use crate::logging::Logger;

/// Environment variable naming an explicit server binary
pub const BINARY_ENV_VAR: &str = "PENCIL_MCP_BINARY";

/// Settings for locating and launching the Pencil MCP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Explicit server binary, probed before the platform install paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_path: Option<PathBuf>,
    /// Arguments the server is launched with
    pub launch_args: Vec<String>,
    /// Key of the server entry in the companion config file
    pub companion_server: String,
    /// Companion config file, `~/.claude.json` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_config: Option<PathBuf>,
    /// Host widget id used for the status indicator
    pub widget_id: String,
    /// Client name sent during the MCP handshake
    pub client_name: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            binary_path: None,
            launch_args: vec!["--app".to_string(), "desktop".to_string()],
            companion_server: "pencil".to_string(),
            companion_config: None,
            widget_id: "pencil".to_string(),
            client_name: "pi-pencil".to_string(),
        }
    }
}

impl BridgeSettings {
    /// Apply environment overrides using `lookup` to read variables
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(BINARY_ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.binary_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Resolve the companion config path against `home`
    pub fn companion_config_path(&self, home: &Path) -> PathBuf {
        self.companion_config
            .clone()
            .unwrap_or_else(|| home.join(".claude.json"))
    }
}

/// YAML settings file
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// User-level settings (`<config dir>/pencil-bridge/config.yaml`)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("pencil-bridge").join("config.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings; a missing file yields the defaults
    pub fn load(&self) -> ConfigResult<BridgeSettings> {
        if !self.exists() {
            return Ok(BridgeSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BridgeSettings::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load settings, falling back to defaults on a malformed file
    pub fn load_or_default(&self, logger: &dyn Logger) -> BridgeSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                logger.warn(&format!(
                    "[Settings] Ignoring {}: {}",
                    self.path.display(),
                    e
                ));
                BridgeSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &BridgeSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(settings)?)?;
        Ok(())
    }
}
