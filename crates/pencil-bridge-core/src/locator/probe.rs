//! Read-only view of the host system used during discovery

use std::path::{Path, PathBuf};

use super::platform::Platform;

/// Everything the locator needs to know about the machine
///
/// `HostSystem` answers from the real process; tests substitute a fake.
pub trait SystemProbe: Send + Sync {
    fn platform(&self) -> Platform;

    /// CPU architecture in the server's naming (`arm64`, `x64`, ...)
    fn arch(&self) -> String;

    fn env_var(&self, key: &str) -> Option<String>;

    fn home_dir(&self) -> Option<PathBuf>;

    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// The machine this process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSystem;

impl SystemProbe for HostSystem {
    fn platform(&self) -> Platform {
        Platform::from_os(std::env::consts::OS)
    }

    fn arch(&self) -> String {
        match std::env::consts::ARCH {
            "aarch64" => "arm64".to_string(),
            "x86_64" => "x64".to_string(),
            "x86" => "ia32".to_string(),
            other => other.to_string(),
        }
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}
