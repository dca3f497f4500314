//! Backend boundary traits
//!
//! These traits abstract the stores behind a configuration, allowing the
//! same path-based API over network key-value services and parsed documents.

use crate::domain::{Leaf, Node, Path};
use crate::infrastructure::InfraResult;

/// A configuration store addressed by resolved paths.
///
/// Paths reaching a backend already carry the instance prefix.
pub trait Backend: Send {
    /// Short backend name for logs and errors.
    fn name(&self) -> &'static str;

    /// Leaf stored exactly at `path`.
    /// Returns `None` for missing paths and for branches.
    fn get(&self, path: &Path) -> InfraResult<Option<Leaf>>;

    /// Store a scalar at `path`.
    fn put(&mut self, path: &Path, value: &Leaf) -> InfraResult<()>;

    /// Whole subtree rooted at `path`, re-rooted so its paths are relative.
    /// Fails with `PathNotFound` when nothing lives under `path`.
    fn get_recursive(&self, path: &Path) -> InfraResult<Node>;
}

/// Flat string store with prefix scans (etcd, Consul, memory).
///
/// Keys are canonical: `/`-joined with a leading `/`.
pub trait KeyValueStore: Send {
    fn name(&self) -> &'static str;

    /// Value at exactly `key`.
    fn get(&self, key: &str) -> InfraResult<Option<String>>;

    fn put(&mut self, key: &str, value: &str) -> InfraResult<()>;

    /// All entries whose key starts with `prefix`, in store order.
    fn scan(&self, prefix: &str) -> InfraResult<Vec<(String, String)>>;
}
