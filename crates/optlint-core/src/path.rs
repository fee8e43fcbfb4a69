//! # Symbolic Paths
//!
//! A [`SymbolPath`] names a location inside a schema document as a list of
//! segments: object keys, stringified list indices, and an empty segment
//! marking descent into a subsection's nested option list.
//!
//! Rendered as `-> 'loadingOptions' -> '0' -> '' -> '2' -> 'range'`. The
//! empty segment shows up as `''` in the breadcrumb.

use std::fmt;

use serde::Serialize;

/// Breadcrumb path to a node, key, or list element in a schema document.
///
/// Serializes as the plain list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SymbolPath {
    segments: Vec<String>,
}

impl SymbolPath {
    /// The empty path (document root).
    pub fn root() -> Self {
        Self::default()
    }

    /// A path with a single segment.
    pub fn key(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Extend with a key segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Extend with a list index segment.
    pub fn index(&self, index: usize) -> Self {
        self.join(index.to_string())
    }

    /// Extend with the empty segment marking entry into a nested option list.
    pub fn descend(&self) -> Self {
        self.join(String::new())
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for SymbolPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("-> ")?;
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "'{segment}'")?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
