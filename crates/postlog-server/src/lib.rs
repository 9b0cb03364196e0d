//! HTTP server for postlog.
//!
//! Exposes a single route, `POST /log`, which decodes the request body as
//! JSON and appends it as one line to the configured log file.
//!
//! | outcome                 | status | body                      |
//! |-------------------------|--------|---------------------------|
//! | recorded                | 200    | `Log Received`            |
//! | body is not JSON        | 400    | `{"error": "..."}`        |
//! | nesting over the cap    | 422    | `{"error": "..."}`        |
//! | body over the size cap  | 413    | plain-text rejection      |
//! | sink failed             | 500    | `{"error": "..."}`        |

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::LOG_RECEIVED;
pub use router::{build_router, LOG_ROUTE};
pub use server::LogServer;
pub use state::AppState;
