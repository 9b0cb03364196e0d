use std::sync::{Mutex, PoisonError};

use crate::error::SinkResult;
use crate::traits::LogDestination;

/// In-memory destination backed by a `Vec<u8>`.
///
/// Intended for tests and embedding. Appends are serialized by a `Mutex`,
/// the same discipline [`crate::FileDestination`] uses.
#[derive(Default)]
pub struct InMemoryDestination {
    buf: Mutex<Vec<u8>>,
}

impl InMemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing bytes, as if the log already had content.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            buf: Mutex::new(bytes.into()),
        }
    }

    /// Snapshot of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Contents split into lines, lossily decoded as UTF-8.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.contents())
            .lines()
            .map(str::to_owned)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogDestination for InMemoryDestination {
    fn append(&self, bytes: &[u8]) -> SinkResult<()> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".into()
    }
}
