use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use postlog_types::{LogRecord, SourceId};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Body returned for every successfully recorded payload.
pub const LOG_RECEIVED: &str = "Log Received";

/// `POST /log`: decode the body as JSON and append it as one line.
///
/// The `Content-Type` header is not checked. Any body that parses as a
/// single JSON document is accepted.
pub async fn log_handler(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    body: Bytes,
) -> ServerResult<(StatusCode, &'static str)> {
    let record = LogRecord::from_slice_with_depth(&body, state.max_depth())?;
    let source = peer.map(|ConnectInfo(addr)| SourceId::from(addr));

    // File I/O blocks; keep it off the async workers.
    let sink = Arc::clone(state.sink());
    tokio::task::spawn_blocking(move || sink.record_from(&record, source.as_ref()))
        .await
        .map_err(|e| ServerError::Internal(format!("sink task failed: {e}")))??;

    Ok((StatusCode::OK, LOG_RECEIVED))
}
