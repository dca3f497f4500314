//! Conversion between trees and flat, ordered (path, leaf) lists.

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::leaf::Leaf;
use crate::domain::node::{Branch, Node};
use crate::domain::path::Path;

/// Flatten `root` depth-first, pre-order, in branch iteration order.
///
/// A leaf root yields a single pair with the root path.
pub fn tree_to_key_values(root: &Node) -> Vec<(Path, Leaf)> {
    let mut pairs = Vec::new();
    flatten_into(root, &Path::root(), &mut pairs);
    pairs
}

fn flatten_into(node: &Node, path: &Path, pairs: &mut Vec<(Path, Leaf)>) {
    match node {
        Node::Leaf(leaf) => pairs.push((path.clone(), leaf.clone())),
        Node::Branch(branch) => {
            for (key, child) in branch.iter() {
                flatten_into(child, &path.child(key), pairs);
            }
        }
    }
}

/// Build a tree from pairs, in input order.
///
/// Duplicate paths overwrite (last write wins). A path used both as a value
/// and as a container is a `StructuralConflict`. When every pair has the
/// root path the result is that leaf, otherwise it is a branch.
pub fn key_values_to_tree<I>(pairs: I) -> DomainResult<Node>
where
    I: IntoIterator<Item = (Path, Leaf)>,
{
    let mut root = Branch::new();
    let mut root_leaf: Option<Leaf> = None;

    for (path, leaf) in pairs {
        if path.is_root() {
            if !root.is_empty() {
                return Err(conflict(&path));
            }
            root_leaf = Some(leaf);
            continue;
        }
        if root_leaf.is_some() {
            return Err(conflict(&path));
        }
        insert_leaf(&mut root, path.segments(), leaf, &path)?;
    }

    Ok(match root_leaf {
        Some(leaf) => Node::Leaf(leaf),
        None => Node::Branch(root),
    })
}

fn insert_leaf(
    branch: &mut Branch,
    segments: &[String],
    leaf: Leaf,
    full: &Path,
) -> DomainResult<()> {
    let Some((head, rest)) = segments.split_first() else {
        return Err(conflict(full));
    };

    if rest.is_empty() {
        if let Some(Node::Branch(_)) = branch.get(head) {
            return Err(conflict(full));
        }
        branch.insert(head.as_str(), leaf);
        return Ok(());
    }

    match branch.get_or_insert_with(head, || Node::Branch(Branch::new())) {
        Node::Branch(child) => insert_leaf(child, rest, leaf, full),
        Node::Leaf(_) => Err(conflict(full)),
    }
}

fn conflict(path: &Path) -> DomainError {
    DomainError::StructuralConflict {
        path: path.to_string(),
    }
}

/// [`tree_to_key_values`] with paths rendered using `separator`.
pub fn tree_to_key_values_str(root: &Node, separator: char) -> Vec<(String, Leaf)> {
    tree_to_key_values(root)
        .into_iter()
        .map(|(path, leaf)| (path.to_string_with(separator), leaf))
        .collect()
}

/// [`key_values_to_tree`] over path strings split with `separator`.
pub fn key_values_to_tree_str<S: AsRef<str>>(
    pairs: &[(S, Leaf)],
    separator: char,
) -> DomainResult<Node> {
    let parsed = pairs
        .iter()
        .map(|(path, leaf)| Ok((Path::parse(path.as_ref(), separator)?, leaf.clone())))
        .collect::<DomainResult<Vec<_>>>()?;
    key_values_to_tree(parsed)
}
