//! Recursive configuration tree: a [`Node`] is a [`Leaf`] or a [`Branch`].

use termtree::Tree;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::leaf::{FromLeaf, Leaf};
use crate::domain::path::{Path, CANONICAL_SEPARATOR};

/// Element of a configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

/// Ordered mapping from key to child node.
///
/// Keys are unique and keep their insertion order. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Branch {
    children: Vec<(String, Node)>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace `key`. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let node = node.into();
        match self.children.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, node)),
            None => {
                self.children.push((key, node));
                None
            }
        }
    }

    /// Child at `key`, created with `default` when absent.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Node,
    ) -> &mut Node {
        let index = match self.children.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.children.push((key.to_string(), default()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Branch {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .children
                .iter()
                .all(|(key, node)| other.get(key) == Some(node))
    }
}

impl<K: Into<String>, N: Into<Node>> FromIterator<(K, N)> for Branch {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        let mut branch = Branch::new();
        for (key, node) in iter {
            branch.insert(key, node);
        }
        branch
    }
}

impl IntoIterator for Branch {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for &'a Branch {
    type Item = (&'a str, &'a Node);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Node)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    /// Node reached by following `path` from `self`, if any.
    pub fn find(&self, path: &Path) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.as_branch()?.get(segment))
    }

    /// Like [`Node::find`] but fails with `PathNotFound`.
    pub fn subtree(&self, path: &Path) -> DomainResult<&Node> {
        self.find(path).ok_or_else(|| DomainError::PathNotFound {
            path: path.to_string(),
        })
    }

    /// Typed value at a `/`-separated path relative to this node.
    ///
    /// `None` when nothing is there, a branch is there, or the leaf does not
    /// coerce to `T`.
    pub fn get<T: FromLeaf>(&self, path: &str) -> DomainResult<Option<T>> {
        let path = Path::parse(path, CANONICAL_SEPARATOR)?;
        Ok(self
            .find(&path)
            .and_then(Node::as_leaf)
            .and_then(T::from_leaf))
    }

    /// Typed value at a `/`-separated path; absent or mistyped is `MissingKey`.
    pub fn get_required<T: FromLeaf>(&self, path: &str) -> DomainResult<T> {
        self.get(path)?.ok_or_else(|| DomainError::MissingKey {
            path: path.to_string(),
        })
    }

    /// Render as a `termtree` tree labelled `root`.
    pub fn to_tree_string(&self, root: &str) -> Tree<String> {
        match self {
            Node::Leaf(leaf) => Tree::new(format!("{root} = {leaf}")),
            Node::Branch(branch) => {
                let leaves: Vec<_> = branch
                    .iter()
                    .map(|(key, child)| child.to_tree_string(key))
                    .collect();
                Tree::new(root.to_string()).with_leaves(leaves)
            }
        }
    }
}

impl From<Leaf> for Node {
    fn from(value: Leaf) -> Self {
        Node::Leaf(value)
    }
}

impl From<Branch> for Node {
    fn from(value: Branch) -> Self {
        Node::Branch(value)
    }
}

macro_rules! node_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Leaf(Leaf::from(value))
                }
            }
        )*
    };
}

node_from_scalar!(String, &str, i64, i32, u32, f64, bool);
