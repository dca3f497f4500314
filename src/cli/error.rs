//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        let CliError::Application(e) = self;
        match e {
            ApplicationError::MalformedUri { .. } => exitcode::USAGE,
            ApplicationError::Config { .. } => exitcode::CONFIG,
            ApplicationError::Domain(d) => domain_exit_code(d),
            ApplicationError::Infra(i) => match i {
                InfraError::Domain(d) => domain_exit_code(d),
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Http { .. } => exitcode::UNAVAILABLE,
                InfraError::Document { .. } | InfraError::Decode { .. } => exitcode::DATAERR,
                InfraError::NotSupported { .. } => exitcode::SOFTWARE,
            },
        }
    }
}

fn domain_exit_code(error: &DomainError) -> i32 {
    match error {
        DomainError::MissingKey { .. } | DomainError::PathNotFound { .. } => exitcode::NOINPUT,
        DomainError::MalformedPath { .. }
        | DomainError::StructuralConflict { .. }
        | DomainError::InvalidKey { .. } => exitcode::DATAERR,
    }
}
