//! Platform-specific install locations

use std::path::PathBuf;

use super::probe::SystemProbe;

const MACOS_BUNDLE_DIR: &str = "/Applications/Pencil.app/Contents/Resources/app.asar.unpacked/out";
const WINDOWS_BINARY: &str = "mcp-server-win32-x64.exe";

/// Operating system family, named the way the server's binaries are
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Linux,
    Win32,
    Other(String),
}

impl Platform {
    /// Map a Rust `target_os` name
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" => Platform::Darwin,
            "linux" => Platform::Linux,
            "windows" | "win32" => Platform::Win32,
            other => Platform::Other(other.to_string()),
        }
    }
}

/// Ordered install locations to probe
///
/// On macOS the other architecture's binary is tried second (Rosetta, or a
/// universal install missing one slice).
pub fn candidate_paths(probe: &dyn SystemProbe) -> Vec<PathBuf> {
    match probe.platform() {
        Platform::Darwin => {
            let arch = probe.arch();
            let other = if arch == "arm64" { "x64" } else { "arm64" };
            vec![
                PathBuf::from(format!("{}/mcp-server-darwin-{}", MACOS_BUNDLE_DIR, arch)),
                PathBuf::from(format!("{}/mcp-server-darwin-{}", MACOS_BUNDLE_DIR, other)),
            ]
        }
        Platform::Linux => vec![
            PathBuf::from("/usr/lib/pencil/mcp-server-linux-x64"),
            PathBuf::from("/opt/Pencil/mcp-server-linux-x64"),
        ],
        Platform::Win32 => ["LOCALAPPDATA", "PROGRAMFILES"]
            .iter()
            .filter_map(|var| probe.env_var(var))
            .map(|base| PathBuf::from(windows_join(&base)))
            .collect(),
        Platform::Other(_) => Vec::new(),
    }
}

/// `<base>\Pencil\mcp-server-win32-x64.exe`, independent of the build host
fn windows_join(base: &str) -> String {
    format!(
        "{}\\Pencil\\{}",
        base.trim_end_matches(|c| c == '\\' || c == '/'),
        WINDOWS_BINARY
    )
}
