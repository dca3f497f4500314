//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree model and path rules.
/// These are independent of any backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("path used as both a value and a container: {path}")]
    StructuralConflict { path: String },

    #[error("missing key: {path}")]
    MissingKey { path: String },

    #[error("path not found: {path}")]
    PathNotFound { path: String },

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

impl DomainError {
    pub(crate) fn malformed_path(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
