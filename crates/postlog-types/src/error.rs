/// Errors from decoding or parsing foundation types.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// The bytes are not a single well-formed JSON document.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Well-formed or not, the body nests arrays/objects past the cap.
    #[error("JSON body nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// A line format name that is neither `raw` nor `envelope`.
    #[error("unknown line format: {0}")]
    UnknownFormat(String),
}

/// Result alias for type-level operations.
pub type TypesResult<T> = Result<T, TypesError>;
