//! Binary locator

use std::path::PathBuf;
use std::sync::Arc;

use super::platform::candidate_paths;
use super::probe::{HostSystem, SystemProbe};
use crate::config::{BridgeSettings, CompanionConfig};
use crate::logging::Logger;

/// Finds the Pencil MCP server executable
///
/// Order: the explicit `binary_path` setting, the platform install
/// locations, then the `command` of the companion config entry. Each
/// candidate must exist on disk. Unreadable or malformed companion config
/// counts as "not configured".
pub struct BinaryLocator {
    probe: Arc<dyn SystemProbe>,
    settings: BridgeSettings,
    logger: Arc<dyn Logger>,
}

impl BinaryLocator {
    pub fn new(probe: Arc<dyn SystemProbe>, settings: BridgeSettings, logger: Arc<dyn Logger>) -> Self {
        Self {
            probe,
            settings,
            logger,
        }
    }

    /// Locator for the current machine
    pub fn for_host(settings: BridgeSettings, logger: Arc<dyn Logger>) -> Self {
        Self::new(Arc::new(HostSystem), settings, logger)
    }

    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.settings.binary_path {
            if self.probe.exists(path) {
                self.logger.debug(&format!("[BinaryLocator] Using configured binary {}", path.display()));
                return Some(path.clone());
            }
            self.logger.warn(&format!(
                "[BinaryLocator] Configured binary {} does not exist, probing install paths",
                path.display()
            ));
        }

        for candidate in candidate_paths(self.probe.as_ref()) {
            if self.probe.exists(&candidate) {
                crate::log_debug!(self.logger, "[BinaryLocator] Found {}", candidate.display());
                return Some(candidate);
            }
        }

        let found = self.from_companion_config();
        if found.is_none() {
            self.logger.info("[BinaryLocator] Pencil MCP server not found");
        }
        found
    }

    fn from_companion_config(&self) -> Option<PathBuf> {
        let home = self.probe.home_dir()?;
        let path = self.settings.companion_config_path(&home);
        if !self.probe.exists(&path) {
            return None;
        }

        let config = match self
            .probe
            .read_to_string(&path)
            .map_err(crate::config::ConfigError::from)
            .and_then(|content| CompanionConfig::parse(&content))
        {
            Ok(config) => config,
            Err(e) => {
                self.logger.debug(&format!("[BinaryLocator] Ignoring {}: {}", path.display(), e));
                return None;
            }
        };

        let command = PathBuf::from(config.command_for(&self.settings.companion_server)?);
        if self.probe.exists(&command) {
            self.logger.debug(&format!(
                "[BinaryLocator] Using command from {}: {}",
                path.display(),
                command.display()
            ));
            Some(command)
        } else {
            None
        }
    }
}
