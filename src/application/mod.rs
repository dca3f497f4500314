//! Application layer: configurations, the URI factory and services
//!
//! This layer binds domain paths to backends and depends on the backend boundary traits.

pub mod configuration;
pub mod error;
pub mod factory;
pub mod services;

pub use configuration::{Configuration, KeyValueMap};
pub use error::{ApplicationError, ApplicationResult};
pub use factory::{BackendUri, ConfigurationFactory};
