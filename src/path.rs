//! Attribute paths into a configuration tree.
//!
//! A path is a sequence of steps, each either an attribute/block name or a
//! list index. Paths render in dotted form, so the condition of the second
//! `assert` block in a `check` data source is `assert.1.condition`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single step in an [`AttributePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// An attribute or block name.
    Name(String),
    /// An index into a list block or list attribute.
    Index(usize),
}

/// A symbolic pointer to an attribute within a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The empty path, pointing at the configuration root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A path with a single top-level attribute name.
    pub fn root(name: impl Into<String>) -> Self {
        Self::empty().name(name)
    }

    /// Append an attribute name step.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::Name(name.into()));
        self
    }

    /// Append a list index step.
    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(PathStep::Index(index));
        self
    }

    /// The steps making up this path.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Whether this path points at the root.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match step {
                PathStep::Name(name) => f.write_str(name)?,
                PathStep::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

/// Parse a dotted path.
///
/// A segment in canonical decimal form (`0`, `1`, `12`, no sign or leading
/// zeros) becomes an index step; anything else is a name. Attribute names
/// never start with a digit, so this only rules out paths no schema can
/// declare. Build paths with [`AttributePath::name`] and
/// [`AttributePath::index`] when a segment is not a plain identifier.
impl From<&str> for AttributePath {
    fn from(dotted: &str) -> Self {
        let steps = dotted
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match parse_index(segment) {
                Some(index) => PathStep::Index(index),
                None => PathStep::Name(segment.to_string()),
            })
            .collect();
        Self { steps }
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    let canonical = segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

impl From<String> for AttributePath {
    fn from(dotted: String) -> Self {
        Self::from(dotted.as_str())
    }
}

impl PartialEq<str> for AttributePath {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for AttributePath {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}
