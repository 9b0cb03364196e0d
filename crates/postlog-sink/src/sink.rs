use std::sync::Arc;

use chrono::Utc;
use postlog_types::{LineFormat, SourceId};
use serde::Serialize;
use tracing::debug;

use crate::error::SinkResult;
use crate::line::encode_line;
use crate::traits::LogDestination;

/// Record one payload as one raw JSON line on `destination`.
pub fn record<T>(payload: &T, destination: &dyn LogDestination) -> SinkResult<()>
where
    T: Serialize + ?Sized,
{
    let line = encode_line(payload, None, LineFormat::Raw, Utc::now())?;
    destination.append(&line)
}

/// A sink bound to one destination and one line format.
///
/// Stateless apart from the injected destination: every call renders its
/// line first and only then takes the destination's append lock, so a
/// payload that fails to render never touches the log.
pub struct LogSink {
    destination: Arc<dyn LogDestination>,
    format: LineFormat,
}

impl LogSink {
    pub fn new(destination: Arc<dyn LogDestination>) -> Self {
        Self::with_format(destination, LineFormat::default())
    }

    pub fn with_format(destination: Arc<dyn LogDestination>, format: LineFormat) -> Self {
        Self {
            destination,
            format,
        }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn destination(&self) -> &Arc<dyn LogDestination> {
        &self.destination
    }

    /// Append `payload` as one line.
    pub fn record<T>(&self, payload: &T) -> SinkResult<()>
    where
        T: Serialize + ?Sized,
    {
        self.record_from(payload, None)
    }

    /// Append `payload` as one line, tagged with `source` when the format
    /// carries one.
    pub fn record_from<T>(&self, payload: &T, source: Option<&SourceId>) -> SinkResult<()>
    where
        T: Serialize + ?Sized,
    {
        let line = encode_line(payload, source, self.format, Utc::now())?;
        self.destination.append(&line)?;
        debug!(
            destination = %self.destination.describe(),
            bytes = line.len(),
            source = source.map(SourceId::as_str),
            "appended record"
        );
        Ok(())
    }
}
