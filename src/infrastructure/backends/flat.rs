//! [`Backend`] over any flat [`KeyValueStore`].
//!
//! Recursive reads scan the key prefix and rebuild a tree with the codec.

use tracing::{debug, warn};

use crate::domain::{
    key_values_to_tree, Branch, DomainError, Leaf, Node, Path, CANONICAL_SEPARATOR,
};
use crate::infrastructure::traits::{Backend, KeyValueStore};
use crate::infrastructure::InfraResult;

/// Adapts a flat store to the hierarchical backend contract.
pub struct FlatBackend<S> {
    store: S,
}

impl<S: KeyValueStore> FlatBackend<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Turn scanned entries under `scan_prefix` into relative (path, leaf) pairs.
    fn relative_pairs(
        &self,
        scan_prefix: &str,
        entries: Vec<(String, String)>,
    ) -> Vec<(Path, Leaf)> {
        entries
            .into_iter()
            .filter_map(|(key, value)| {
                let relative = key.strip_prefix(scan_prefix)?;
                match Path::parse(relative, CANONICAL_SEPARATOR) {
                    Ok(path) if !path.is_root() => Some((path, Leaf::String(value))),
                    Ok(_) => None,
                    Err(e) => {
                        warn!("{}: skipping key {}: {}", self.store.name(), key, e);
                        None
                    }
                }
            })
            .collect()
    }
}

impl<S: KeyValueStore> Backend for FlatBackend<S> {
    fn name(&self) -> &'static str {
        self.store.name()
    }

    fn get(&self, path: &Path) -> InfraResult<Option<Leaf>> {
        if path.is_root() {
            return Ok(None);
        }
        Ok(self.store.get(&path.to_store_key())?.map(Leaf::String))
    }

    fn put(&mut self, path: &Path, value: &Leaf) -> InfraResult<()> {
        if path.is_root() {
            return Err(DomainError::malformed_path("/", "cannot store a value at the root").into());
        }
        let key = path.to_store_key();
        debug!("{}: put {}", self.store.name(), key);
        self.store.put(&key, &value.to_flat_string())
    }

    fn get_recursive(&self, path: &Path) -> InfraResult<Node> {
        if !path.is_root() {
            if let Some(value) = self.store.get(&path.to_store_key())? {
                return Ok(Node::Leaf(Leaf::String(value)));
            }
        }

        let scan_prefix = if path.is_root() {
            CANONICAL_SEPARATOR.to_string()
        } else {
            format!("{}{}", path.to_store_key(), CANONICAL_SEPARATOR)
        };
        let entries = self.store.scan(&scan_prefix)?;
        debug!(
            "{}: scan {} returned {} entries",
            self.store.name(),
            scan_prefix,
            entries.len()
        );

        let pairs = self.relative_pairs(&scan_prefix, entries);
        if pairs.is_empty() {
            if path.is_root() {
                return Ok(Node::Branch(Branch::new()));
            }
            return Err(DomainError::PathNotFound {
                path: path.to_string(),
            }
            .into());
        }
        Ok(key_values_to_tree(pairs)?)
    }
}
