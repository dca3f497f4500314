//! Backend-agnostic hierarchical configuration.
//!
//! Values live in a tree of [`domain::Node`]s addressed by [`domain::Path`]s.
//! A [`application::Configuration`] exposes one path-based API over etcd,
//! Consul, an in-memory store and INI/JSON/TOML/YAML documents; the codec in
//! [`domain::codec`] converts between trees and flat `(path, value)` lists.

#[macro_use]
mod macros;

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    ApplicationError, ApplicationResult, Configuration, ConfigurationFactory, KeyValueMap,
};
pub use domain::{Branch, DomainError, FromLeaf, Leaf, LeafVisitor, Node, Path};
