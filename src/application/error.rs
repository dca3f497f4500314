//! Application-level errors (wraps domain and infrastructure errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Application errors wrap lower layers and add URI and settings failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(InfraError),

    #[error("malformed URI '{uri}': {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Domain failures raised inside a backend surface as `Domain`, so callers
/// match one variant regardless of which backend produced them.
impl From<InfraError> for ApplicationError {
    fn from(error: InfraError) -> Self {
        match error {
            InfraError::Domain(e) => ApplicationError::Domain(e),
            other => ApplicationError::Infra(other),
        }
    }
}

impl ApplicationError {
    pub(crate) fn malformed_uri(uri: &str, reason: impl Into<String>) -> Self {
        Self::MalformedUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
