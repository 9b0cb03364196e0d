use std::sync::Arc;

use postlog_sink::LogSink;
use postlog_types::DEFAULT_MAX_DEPTH;

/// Shared handler state: the one sink every request writes through.
#[derive(Clone)]
pub struct AppState {
    sink: Arc<LogSink>,
    max_depth: usize,
}

impl AppState {
    pub fn new(sink: Arc<LogSink>) -> Self {
        Self {
            sink,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn sink(&self) -> &Arc<LogSink> {
        &self.sink
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
