//! Foundation types for postlog.
//!
//! A [`LogRecord`] is the opaque payload of one `POST /log` request: any
//! JSON value, with no schema. A [`SourceId`] optionally names where the
//! record came from, and a [`LineFormat`] decides how a record is laid out
//! on its line in the log file.

pub mod error;
pub mod format;
pub mod record;
pub mod source;

pub use error::{TypesError, TypesResult};
pub use format::LineFormat;
pub use record::{LogRecord, DEFAULT_MAX_DEPTH};
pub use source::SourceId;
