//! Error Types for Asset Analyzer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Message returned when no resolver could price an asset
pub const ASSET_NOT_FOUND: &str = "Asset not found";

#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Request body was malformed or out of range
    #[error("{0}")]
    Validation(String),

    /// No resolver produced a priced quote
    #[error("{0}")]
    NotFound(String),

    /// Upstream provider answered with something unusable
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse failure category, used by the HTTP layer to pick a status code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Internal,
}

impl AnalyzerError {
    pub fn not_found() -> Self {
        Self::NotFound(ASSET_NOT_FOUND.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }
}
