use std::sync::Arc;

use crate::config::Config;
use crate::screening::analyzer::RelevanceAnalyzer;
use crate::storage::UploadStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Production: GeminiAnalyzer. Tests inject a fake.
    pub analyzer: Arc<dyn RelevanceAnalyzer>,
    pub store: Arc<UploadStore>,
    /// Kept alongside the clients it configured, for handlers that need it.
    #[allow(dead_code)]
    pub config: Config,
}
