//! Application State

use std::sync::Arc;

use asset_analyzer::Analyzer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Classifier + price resolvers; holds no per-request data
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}
