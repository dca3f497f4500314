//! Infrastructure layer: backend drivers and DI container
//!
//! This layer implements the backend boundary traits and wires up services.

pub mod backends;
pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};
