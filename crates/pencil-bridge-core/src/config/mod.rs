//! Configuration sources
//!
//! - `SettingsFile`: the bridge's own YAML settings (user level)
//! - `CompanionConfig`: the JSON file another MCP host keeps in the user's
//!   home directory, consulted as a fallback when probing for the binary

mod error;
mod settings;
mod companion;

pub use error::{ConfigError, ConfigResult};
pub use settings::{BridgeSettings, SettingsFile, BINARY_ENV_VAR};
pub use companion::{CompanionConfig, CompanionServer};
