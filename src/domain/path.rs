//! Segmented paths addressing nodes in a configuration tree.
//!
//! A path string such as `/equipment_1/serial` is split on a single
//! separator character into segments. Paths are kept as segments everywhere
//! and only joined again when rendered for a caller or a flat store.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Separator used by flat stores and by `Display`.
pub const CANONICAL_SEPARATOR: char = '/';

/// Check that `key` can be used as a branch key or path segment.
pub fn validate_key(key: &str) -> DomainResult<()> {
    if key.is_empty() {
        return Err(DomainError::InvalidKey {
            key: key.to_string(),
            reason: "empty key".to_string(),
        });
    }
    if key.contains(CANONICAL_SEPARATOR) {
        return Err(DomainError::InvalidKey {
            key: key.to_string(),
            reason: format!("key contains '{CANONICAL_SEPARATOR}'"),
        });
    }
    Ok(())
}

/// Ordered sequence of valid key segments. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path string using `separator`.
    ///
    /// One leading and one trailing separator are discarded; `""` and a lone
    /// separator both yield the root. Empty segments (doubled separators)
    /// are rejected, as are segments containing `/` when `separator` is
    /// something else.
    pub fn parse(path: &str, separator: char) -> DomainResult<Self> {
        let rest = path.strip_prefix(separator).unwrap_or(path);
        if rest.is_empty() {
            return Ok(Self::root());
        }
        let rest = rest.strip_suffix(separator).unwrap_or(rest);

        let mut segments = Vec::new();
        for segment in rest.split(separator) {
            if segment.is_empty() {
                return Err(DomainError::malformed_path(
                    path,
                    format!("empty segment (doubled '{separator}')"),
                ));
            }
            validate_key(segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    pub fn from_segments<I, S>(segments: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.iter().any(String::is_empty) {
            return Err(DomainError::malformed_path(
                &segments.join("/"),
                "empty segment",
            ));
        }
        for segment in &segments {
            validate_key(segment)?;
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// `self` followed by all segments of `other`.
    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Path { segments }
    }

    /// `self` extended by a single key.
    pub fn child(&self, key: &str) -> Path {
        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Path { segments }
    }

    /// Remaining segments after `prefix`, if `prefix` is a segment-wise prefix.
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        self.segments
            .strip_prefix(prefix.segments.as_slice())
            .map(|rest| Path {
                segments: rest.to_vec(),
            })
    }

    /// Render with a leading separator, e.g. `/a/b`. The root renders as `""`.
    pub fn to_string_with(&self, separator: char) -> String {
        if self.is_root() {
            return String::new();
        }
        let sep = separator.to_string();
        format!("{}{}", sep, self.segments.iter().join(&sep))
    }

    /// Key under which a flat store holds this path. The root maps to `/`.
    pub fn to_store_key(&self) -> String {
        if self.is_root() {
            CANONICAL_SEPARATOR.to_string()
        } else {
            self.to_string_with(CANONICAL_SEPARATOR)
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_store_key())
    }
}
