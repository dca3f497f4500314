//! Domain layer: the tree model, paths and the tree codec
//!
//! This layer is independent of external concerns (no I/O, no backends, no config loading).

pub mod codec;
pub mod error;
pub mod leaf;
pub mod node;
pub mod path;
pub mod visitor;

pub use codec::{
    key_values_to_tree, key_values_to_tree_str, tree_to_key_values, tree_to_key_values_str,
};
pub use error::{DomainError, DomainResult};
pub use leaf::{FromLeaf, Leaf};
pub use node::{Branch, Node};
pub use path::{validate_key, Path, CANONICAL_SEPARATOR};
pub use visitor::{apply, LeafVisitor};
