use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use postlog_sink::LogSink;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// The postlog HTTP listener.
pub struct LogServer {
    config: ServerConfig,
    sink: Arc<LogSink>,
}

impl LogServer {
    /// Server writing to the file named by `config`.
    pub fn new(config: ServerConfig) -> Self {
        let sink = Arc::new(config.build_sink());
        Self { config, sink }
    }

    /// Server writing through an already-built sink; `config.log_path`,
    /// `line_format` and `sync_mode` are ignored.
    pub fn with_sink(config: ServerConfig, sink: Arc<LogSink>) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn sink(&self) -> &Arc<LogSink> {
        &self.sink
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(Arc::clone(&self.sink)).with_max_depth(self.config.max_depth);
        build_router(state, self.config.max_body_bytes)
    }

    /// Bind `config.bind_addr` and serve until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    /// In-flight requests finish before this returns.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            log_file = %self.sink.destination().describe(),
            format = %self.sink.format(),
            "postlog listening"
        );

        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("postlog stopped");
        Ok(())
    }
}
