use std::io;

/// Errors from recording a payload.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The destination could not be opened or appended to.
    #[error("cannot append to {destination}: {source}")]
    Unwritable {
        destination: String,
        #[source]
        source: io::Error,
    },

    /// The payload has no JSON text form.
    #[error("payload cannot be rendered as text: {0}")]
    Unserializable(#[from] serde_json::Error),
}

impl SinkError {
    pub fn unwritable(destination: impl Into<String>, source: io::Error) -> Self {
        Self::Unwritable {
            destination: destination.into(),
            source,
        }
    }
}

/// Result alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;
