use chrono::{DateTime, Utc};
use postlog_types::{LineFormat, SourceId};
use serde::Serialize;

use crate::error::SinkResult;

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    received_at: DateTime<Utc>,
    source: Option<&'a SourceId>,
    payload: &'a T,
}

/// Render `payload` as one complete line, trailing `\n` included.
///
/// Compact JSON escapes every control character, so the returned bytes hold
/// exactly one newline: the last one.
pub fn encode_line<T>(
    payload: &T,
    source: Option<&SourceId>,
    format: LineFormat,
    received_at: DateTime<Utc>,
) -> SinkResult<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut line = match format {
        LineFormat::Raw => serde_json::to_vec(payload)?,
        LineFormat::Envelope => serde_json::to_vec(&Envelope {
            received_at,
            source,
            payload,
        })?,
    };
    line.push(b'\n');
    Ok(line)
}
