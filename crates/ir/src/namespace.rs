//! Namespace prefixes
//!
//! A schema's namespace prefix names the sub-namespace every generated class
//! lives in (`Warranty\Setup`). Schema documents may spell it with dots,
//! backslashes or slashes; all three parse to the same segment list.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Ordered namespace segments, e.g. `["Warranty", "Setup"]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Parse a prefix written with `.`, `\` or `/` separators.
    ///
    /// Leading and trailing separators are ignored; an empty segment in the
    /// middle is kept so validation can report it.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim().trim_matches(|c: char| matches!(c, '.' | '\\' | '/'));
        if trimmed.is_empty() {
            return Self::default();
        }

        let segments = trimmed
            .split(['.', '\\', '/'])
            .map(|seg| seg.trim().to_string())
            .collect();

        Self { segments }
    }

    /// Build from already-split segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The individual segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the prefix has no segments (classes sit directly under the kind root)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// PHP spelling, e.g. `Warranty\Setup`
    pub fn to_php(&self) -> String {
        self.segments.join("\\")
    }

    /// Dotted spelling, e.g. `Warranty.Setup`
    pub fn to_dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Relative directory for generated files, e.g. `Warranty/Setup`
    pub fn to_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Qualify a namespace root with this prefix (`App\Dto` → `App\Dto\Warranty\Setup`)
    pub fn under(&self, root: &str) -> String {
        if self.is_empty() {
            root.to_string()
        } else {
            format!("{}\\{}", root, self.to_php())
        }
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_php())
    }
}

impl FromStr for NamespacePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for NamespacePath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for NamespacePath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<NamespacePath> for String {
    fn from(ns: NamespacePath) -> Self {
        ns.to_dotted()
    }
}

// ============================================================================
// Tests
// ============================================================================
