//! Application services
//!
//! Concrete services that orchestrate configurations obtained from the factory.

mod copy;

pub use copy::{CopyReport, CopyService};
