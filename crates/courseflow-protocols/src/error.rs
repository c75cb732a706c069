//! Error types shared across the workspace.

use thiserror::Error;

/// Errors raised at the remote-client boundary. The aggregator converts
/// these into kept-previous outcomes; they never propagate past it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}

impl ClientError {
    /// Numeric status for transport errors, if the response got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the persistent cache. Callers log and swallow these;
/// caching is best-effort and never fatal.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from the study-plan advisor.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No content in model response")]
    MissingContent,

    #[error("Failed to parse plan JSON: {0}")]
    Parse(String),
}
