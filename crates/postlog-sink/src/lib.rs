//! Append-only log sink for postlog.
//!
//! The sink turns one payload into one line of text and appends it to a
//! destination. That is the whole job, but it has to hold under load:
//!
//! 1. Each record becomes exactly one `\n`-terminated line.
//! 2. Existing bytes are never rewritten or truncated.
//! 3. Concurrent appends never interleave; each line lands as one block.
//! 4. Failures are reported to the caller and never retried.
//!
//! # Destinations
//!
//! All destinations implement the [`LogDestination`] trait:
//!
//! - [`FileDestination`] -- lazily opened append-mode file
//! - [`InMemoryDestination`] -- `Vec<u8>` buffer for tests and embedding

pub mod error;
pub mod file;
pub mod line;
pub mod memory;
pub mod sink;
pub mod traits;

pub use error::{SinkError, SinkResult};
pub use file::{FileDestination, FileOptions, SyncMode};
pub use line::encode_line;
pub use memory::InMemoryDestination;
pub use sink::{record, LogSink};
pub use traits::LogDestination;
