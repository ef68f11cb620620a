//! File-based logger for troubleshooting
//!
//! Useful when the host swallows stderr. Lines are appended to
//! `pencil-bridge.log` in the temp directory unless another path is given.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::traits::Logger;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "debug" | "trace" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Process-wide logger configured from `PENCIL_DEBUG` / `PENCIL_LOG_LEVEL`
static SHARED: Lazy<Arc<FileLogger>> = Lazy::new(|| Arc::new(FileLogger::from_env()));

/// Logger that appends timestamped lines to a file
pub struct FileLogger {
    path: PathBuf,
    file: Mutex<Option<File>>,
    min_level: LogLevel,
    enabled: bool,
}

impl FileLogger {
    /// Open (or create) `path` for appending
    ///
    /// An unopenable file leaves the logger silent rather than failing.
    pub fn new(path: impl Into<PathBuf>, min_level: LogLevel) -> Self {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path).ok();
        Self {
            path,
            file: Mutex::new(file),
            min_level,
            enabled: true,
        }
    }

    /// Logger at the default path, honouring the environment switches
    pub fn from_env() -> Self {
        let min_level = std::env::var("PENCIL_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);
        let enabled = std::env::var("PENCIL_DEBUG")
            .map(|v| v != "0" && v.to_lowercase() != "false")
            .unwrap_or(true);

        let mut logger = Self::new(Self::default_path(), min_level);
        logger.enabled = enabled;
        logger
    }

    /// The shared process-wide instance
    pub fn shared() -> Arc<dyn Logger> {
        SHARED.clone()
    }

    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join("pencil-bridge.log")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the log file
    pub fn clear(&self) {
        let mut file = self.file.lock();
        *file = File::create(&self.path).ok();
    }

    fn write(&self, level: LogLevel, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        let mut guard = self.file.lock();
        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "[{}] [{}] {}", timestamp(), level, message);
            let _ = file.flush();
        }
    }
}

/// `HH:MM:SS.mmm` (UTC) of the current time
fn timestamp() -> String {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs();
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                (secs % 86400) / 3600,
                (secs % 3600) / 60,
                secs % 60,
                d.subsec_millis()
            )
        })
        .unwrap_or_else(|_| "??:??:??.???".to_string())
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(LogLevel::Error, message);
    }
}

impl std::fmt::Debug for FileLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLogger")
            .field("path", &self.path)
            .field("min_level", &self.min_level)
            .field("enabled", &self.enabled)
            .finish()
    }
}
