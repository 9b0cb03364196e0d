use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SinkError, SinkResult};
use crate::traits::LogDestination;

/// Flush/sync strategy after each append.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Rely on the OS page cache (fastest, least durable).
    #[default]
    OsDefault,
    /// `fdatasync` after every append (safest, highest latency).
    EveryWrite,
}

/// Options for a [`FileDestination`].
#[derive(Clone, Debug, Default)]
pub struct FileOptions {
    pub sync_mode: SyncMode,
}

/// Append-mode log file, reopened for every line.
///
/// Each append opens the path with create+append, writes the whole line in a
/// single `write_all` and closes it again, all while holding one mutex, so
/// lines from concurrent callers never interleave. Reopening means a log file
/// that is deleted or rotated away underneath us is recreated on the next
/// append instead of swallowing records into an unlinked inode. `O_APPEND`
/// keeps other processes appending to the same path from overwriting our
/// bytes.
///
/// Parent directories are never created. A missing directory is an
/// unwritable destination, not something to repair.
pub struct FileDestination {
    path: PathBuf,
    options: FileOptions,
    /// Serializes open+write+close across callers.
    lock: Mutex<()>,
}

impl FileDestination {
    pub fn new(path: impl Into<PathBuf>, options: FileOptions) -> Self {
        Self {
            path: path.into(),
            options,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    fn write_line(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(bytes)?;
        if self.options.sync_mode == SyncMode::EveryWrite {
            file.sync_data()?;
        }
        Ok(())
    }
}

impl LogDestination for FileDestination {
    fn append(&self, bytes: &[u8]) -> SinkResult<()> {
        // Poison is ignored: the mutex guards no data.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.write_line(bytes).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "log append failed");
            SinkError::unwritable(self.describe(), e)
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
