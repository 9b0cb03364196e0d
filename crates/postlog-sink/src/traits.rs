use crate::error::SinkResult;

/// An append-only byte target shared by every caller of a sink.
///
/// Implementations must satisfy:
/// - `append` adds `bytes` after everything previously written and never
///   touches earlier bytes.
/// - The bytes of one `append` call form one contiguous block, no matter how
///   many threads call `append` at the same time.
/// - Failures are returned, never swallowed or retried.
pub trait LogDestination: Send + Sync {
    /// Append `bytes` as a single uninterrupted block.
    fn append(&self, bytes: &[u8]) -> SinkResult<()>;

    /// Human-readable name for logs and error messages.
    fn describe(&self) -> String;
}
