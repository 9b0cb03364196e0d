use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use postlog_types::TypesError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    InvalidPayload(#[from] TypesError),

    #[error("sink error: {0}")]
    Sink(#[from] postlog_sink::SinkError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(TypesError::TooDeep { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_client_error() {
            tracing::debug!(error = %self, "rejected request");
            self.to_string()
        } else {
            // Server-side details (paths, OS errors) stay in our own logs.
            tracing::error!(error = %self, "failed to record log");
            "failed to record log".to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
