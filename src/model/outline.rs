//! Outline extraction output types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// A heading level label, rendered as `"H1"`, `"H2"`, ...
///
/// Level 1 is the largest font size observed in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadingLevel(u32);

impl HeadingLevel {
    /// The top heading level.
    pub const H1: HeadingLevel = HeadingLevel(1);

    /// Level for a 0-based rank in the descending list of distinct sizes.
    pub fn from_rank(rank: usize) -> Self {
        HeadingLevel(rank as u32 + 1)
    }

    /// Numeric depth (1 for H1).
    pub fn depth(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

impl FromStr for HeadingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('H')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(HeadingLevel)
            .ok_or_else(|| Error::InvalidInput(format!("not a heading level: {s:?}")))
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One entry of an extracted outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Heading level
    pub level: HeadingLevel,

    /// Normalized heading text
    pub text: String,

    /// Page index (0-based)
    pub page: usize,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document title
    pub title: String,

    /// Headings in reading order
    pub outline: Vec<OutlineItem>,
}
