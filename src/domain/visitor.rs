//! Type dispatch over [`Leaf`] variants.

use crate::domain::leaf::Leaf;

/// Invoke the callback matching the variant of `value` and return its result.
///
/// Exactly one callback runs. Adding a [`Leaf`] variant breaks every call
/// site at compile time.
pub fn apply<R>(
    value: &Leaf,
    on_string: impl FnOnce(&str) -> R,
    on_int: impl FnOnce(i64) -> R,
    on_bool: impl FnOnce(bool) -> R,
    on_double: impl FnOnce(f64) -> R,
) -> R {
    match value {
        Leaf::String(v) => on_string(v),
        Leaf::Int(v) => on_int(*v),
        Leaf::Bool(v) => on_bool(*v),
        Leaf::Double(v) => on_double(*v),
    }
}

/// Stateful counterpart of [`apply`].
///
/// Use this when all four callbacks need the same `&mut` state, e.g. a
/// destination being written to.
pub trait LeafVisitor {
    type Output;

    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_int(&mut self, value: i64) -> Self::Output;
    fn visit_bool(&mut self, value: bool) -> Self::Output;
    fn visit_double(&mut self, value: f64) -> Self::Output;
}

impl Leaf {
    pub fn accept<V: LeafVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Leaf::String(v) => visitor.visit_string(v),
            Leaf::Int(v) => visitor.visit_int(*v),
            Leaf::Bool(v) => visitor.visit_bool(*v),
            Leaf::Double(v) => visitor.visit_double(*v),
        }
    }
}
