use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use postlog_sink::{FileDestination, FileOptions, LogSink, SyncMode};
use postlog_types::{LineFormat, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_PATH: &str = "logs.txt";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Server configuration. Every field is optional in TOML form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Log file, relative to the working directory unless absolute.
    pub log_path: PathBuf,
    /// Request bodies above this size are rejected with 413.
    pub max_body_bytes: usize,
    /// Bodies nesting arrays/objects deeper than this are rejected with 422.
    pub max_depth: usize,
    pub line_format: LineFormat,
    pub sync_mode: SyncMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            line_format: LineFormat::default(),
            sync_mode: SyncMode::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Build the file-backed sink this configuration describes.
    pub fn build_sink(&self) -> LogSink {
        let destination = FileDestination::new(
            &self.log_path,
            FileOptions {
                sync_mode: self.sync_mode,
            },
        );
        LogSink::with_format(Arc::new(destination), self.line_format)
    }
}
