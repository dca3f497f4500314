//! Path-based configuration access over any backend.
//!
//! A `Configuration` owns one backend plus the per-instance path separator
//! and prefix. Every path string is split with the separator, appended to
//! the prefix and only then handed to the backend.

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{
    tree_to_key_values, DomainError, FromLeaf, Leaf, Node, Path, CANONICAL_SEPARATOR,
};
use crate::infrastructure::traits::Backend;

/// Ordered path → value listing of a subtree.
pub type KeyValueMap = Vec<(String, String)>;

/// Configuration interface bound to a single backend.
pub struct Configuration {
    backend: Box<dyn Backend>,
    separator: char,
    prefix: Path,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("backend", &self.backend.name())
            .field("separator", &self.separator)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Configuration {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            separator: CANONICAL_SEPARATOR,
            prefix: Path::root(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn path_separator(&self) -> char {
        self.separator
    }

    /// Split later path strings on `separator`. The current prefix is kept as is.
    pub fn set_path_separator(&mut self, separator: char) {
        self.separator = separator;
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Replace the prefix. `prefix` is resolved from the root.
    pub fn set_prefix(&mut self, prefix: &str) -> ApplicationResult<()> {
        self.prefix = Path::parse(prefix, self.separator)?;
        debug!("{}: prefix set to {}", self.backend.name(), self.prefix);
        Ok(())
    }

    /// `prefix + path`.
    pub fn resolve(&self, path: &str) -> ApplicationResult<Path> {
        Ok(self.prefix.join(&Path::parse(path, self.separator)?))
    }

    /// Typed value at `path`; `None` if absent, a branch, or not coercible to `T`.
    pub fn get<T: FromLeaf>(&self, path: &str) -> ApplicationResult<Option<T>> {
        let resolved = self.resolve(path)?;
        debug!("{}: get {}", self.backend.name(), resolved);
        Ok(self.backend.get(&resolved)?.as_ref().and_then(T::from_leaf))
    }

    /// Typed value at `path`; absent or mistyped is a missing-key error.
    pub fn get_required<T: FromLeaf>(&self, path: &str) -> ApplicationResult<T> {
        let resolved = self.resolve(path)?;
        debug!("{}: get_required {}", self.backend.name(), resolved);
        self.backend
            .get(&resolved)?
            .as_ref()
            .and_then(T::from_leaf)
            .ok_or_else(|| {
                DomainError::MissingKey {
                    path: resolved.to_string_with(self.separator),
                }
                .into()
            })
    }

    pub fn put<T: Into<Leaf>>(&mut self, path: &str, value: T) -> ApplicationResult<()> {
        let path = Path::parse(path, self.separator)?;
        self.put_path(&path, value)
    }

    /// Write at `prefix + path` without going through the separator.
    pub fn put_path<T: Into<Leaf>>(&mut self, path: &Path, value: T) -> ApplicationResult<()> {
        let resolved = self.prefix.join(path);
        let value = value.into();
        debug!("{}: put {} ({})", self.backend.name(), resolved, value.kind());
        self.backend.put(&resolved, &value)?;
        Ok(())
    }

    pub fn put_string(&mut self, path: &str, value: &str) -> ApplicationResult<()> {
        self.put(path, value)
    }

    pub fn put_int(&mut self, path: &str, value: i64) -> ApplicationResult<()> {
        self.put(path, value)
    }

    pub fn put_double(&mut self, path: &str, value: f64) -> ApplicationResult<()> {
        self.put(path, value)
    }

    pub fn put_bool(&mut self, path: &str, value: bool) -> ApplicationResult<()> {
        self.put(path, value)
    }

    /// Subtree at `prefix + path`, with paths relative to it.
    pub fn get_recursive(&self, path: &str) -> ApplicationResult<Node> {
        let resolved = self.resolve(path)?;
        debug!("{}: get_recursive {}", self.backend.name(), resolved);
        Ok(self.backend.get_recursive(&resolved)?)
    }

    /// Flattened subtree with every leaf in its flat-store text form.
    pub fn get_recursive_map(&self, path: &str) -> ApplicationResult<KeyValueMap> {
        let tree = self.get_recursive(path)?;
        Ok(tree_to_key_values(&tree)
            .into_iter()
            .map(|(path, leaf)| (path.to_string_with(self.separator), leaf.to_flat_string()))
            .collect())
    }
}

impl From<Box<dyn Backend>> for Configuration {
    fn from(backend: Box<dyn Backend>) -> Self {
        Self::new(backend)
    }
}

