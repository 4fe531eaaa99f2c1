use std::sync::Arc;

use crate::config::Config;
use crate::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; holds the process-wide entity tagger.
    pub parser: Arc<ResumeParser>,
    pub config: Config,
}
