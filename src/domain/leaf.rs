//! Scalar configuration values and typed access to them.

use std::fmt;

use crate::domain::visitor::apply;

/// Atomic configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
}

impl Leaf {
    /// Name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Leaf::String(_) => "string",
            Leaf::Int(_) => "int",
            Leaf::Double(_) => "double",
            Leaf::Bool(_) => "bool",
        }
    }

    /// Text form used by flat key-value stores.
    ///
    /// Booleans become `0`/`1`; numbers use their decimal representation.
    pub fn to_flat_string(&self) -> String {
        apply(
            self,
            str::to_string,
            |v| v.to_string(),
            |v| if v { "1".to_string() } else { "0".to_string() },
            |v| v.to_string(),
        )
    }

    /// Typed view of this leaf, see [`FromLeaf`].
    pub fn coerce<T: FromLeaf>(&self) -> Option<T> {
        T::from_leaf(self)
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_flat_string())
    }
}

impl From<String> for Leaf {
    fn from(value: String) -> Self {
        Leaf::String(value)
    }
}

impl From<&str> for Leaf {
    fn from(value: &str) -> Self {
        Leaf::String(value.to_string())
    }
}

impl From<i64> for Leaf {
    fn from(value: i64) -> Self {
        Leaf::Int(value)
    }
}

impl From<i32> for Leaf {
    fn from(value: i32) -> Self {
        Leaf::Int(i64::from(value))
    }
}

impl From<u32> for Leaf {
    fn from(value: u32) -> Self {
        Leaf::Int(i64::from(value))
    }
}

impl From<f64> for Leaf {
    fn from(value: f64) -> Self {
        Leaf::Double(value)
    }
}

impl From<bool> for Leaf {
    fn from(value: bool) -> Self {
        Leaf::Bool(value)
    }
}

/// Conversion from a stored leaf to a requested Rust type.
///
/// Flat stores only hold text, so strings coerce into numbers and booleans
/// when they parse. A leaf that does not fit yields `None`, never an error.
pub trait FromLeaf: Sized {
    fn from_leaf(leaf: &Leaf) -> Option<Self>;
}

impl FromLeaf for Leaf {
    fn from_leaf(leaf: &Leaf) -> Option<Self> {
        Some(leaf.clone())
    }
}

impl FromLeaf for String {
    fn from_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf {
            Leaf::String(s) => Some(s.clone()),
            other => Some(other.to_flat_string()),
        }
    }
}

impl FromLeaf for i64 {
    fn from_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf {
            Leaf::Int(v) => Some(*v),
            Leaf::Bool(v) => Some(i64::from(*v)),
            Leaf::String(s) => s.trim().parse().ok(),
            Leaf::Double(_) => None,
        }
    }
}

macro_rules! narrow_int_from_leaf {
    ($($ty:ty),*) => {
        $(
            impl FromLeaf for $ty {
                fn from_leaf(leaf: &Leaf) -> Option<Self> {
                    i64::from_leaf(leaf).and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

narrow_int_from_leaf!(i32, u32, u16);

impl FromLeaf for f64 {
    fn from_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf {
            Leaf::Double(v) => Some(*v),
            Leaf::Int(v) => Some(*v as f64),
            Leaf::String(s) => s.trim().parse().ok(),
            Leaf::Bool(_) => None,
        }
    }
}

impl FromLeaf for bool {
    fn from_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf {
            Leaf::Bool(v) => Some(*v),
            Leaf::Int(0) => Some(false),
            Leaf::Int(1) => Some(true),
            Leaf::Int(_) | Leaf::Double(_) => None,
            Leaf::String(s) => match s.trim() {
                "1" => Some(true),
                "0" => Some(false),
                t if t.eq_ignore_ascii_case("true") => Some(true),
                t if t.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
        }
    }
}
