//! Title detection.

use std::collections::HashMap;

use super::levels::SizeKey;
use crate::model::{HeadingLevel, OutlineItem};
use crate::text::clean_text;

/// Title used when a document offers no usable text at all.
pub const UNTITLED: &str = "Untitled Document";

/// Only spans on pages with a lower index than this are title candidates.
pub const TITLE_PAGE_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Running title signal over the first pages of a document.
///
/// Tracks the largest-font span seen so far (replaced only on a strictly
/// larger size, so the earliest of equally sized spans wins) and how often
/// each candidate text occurs.
#[derive(Debug, Clone, Default)]
pub struct TitleTracker {
    best_size: SizeKey,
    best_text: Option<String>,
    tallies: HashMap<String, Tally>,
}

impl TitleTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a normalized candidate text with its rounded size.
    pub fn observe(&mut self, text: &str, size: SizeKey) {
        let order = self.tallies.len();
        self.tallies
            .entry(text.to_string())
            .or_insert(Tally {
                count: 0,
                first_seen: order,
            })
            .count += 1;

        if size > self.best_size {
            self.best_size = size;
            self.best_text = Some(text.to_string());
        }
    }

    /// Text of the largest-font candidate, if any.
    pub fn provisional(&self) -> Option<&str> {
        self.best_text.as_deref()
    }

    /// Most frequent candidate text; ties go to the one seen first.
    pub fn most_frequent(&self) -> Option<&str> {
        self.tallies
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(text, _)| text.as_str())
    }

    /// Number of distinct candidate texts.
    pub fn candidate_count(&self) -> usize {
        self.tallies.len()
    }
}

/// Pick the document title.
///
/// First match wins: the first H1 of the merged outline, the largest-font
/// candidate, the most frequent candidate, then [`UNTITLED`].
pub fn finalize_title(outline: &[OutlineItem], tracker: &TitleTracker) -> String {
    let chosen = outline
        .iter()
        .find(|item| item.level == HeadingLevel::H1)
        .map(|item| item.text.as_str())
        .or_else(|| tracker.provisional())
        .or_else(|| tracker.most_frequent())
        .unwrap_or(UNTITLED);
    clean_text(chosen)
}
