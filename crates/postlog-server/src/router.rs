use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

pub const LOG_ROUTE: &str = "/log";

/// Build the axum router. `/log` is the only route.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(LOG_ROUTE, post(handler::log_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
