//! Font-size to heading-level mapping.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Document, HeadingLevel};

/// A font size rounded to 0.1 pt, kept as integer tenths so it can be
/// hashed and totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SizeKey(i32);

impl SizeKey {
    /// Round a size in points to one decimal place, ties to even.
    ///
    /// Widening to `f64` makes `size * 10` exact, so a tie here is a true
    /// tie in the font size.
    pub fn from_points(size: f32) -> Self {
        let tenths = f64::from(size) * 10.0;
        let floor = tenths.floor();
        let rounded = match (tenths - floor).partial_cmp(&0.5) {
            Some(std::cmp::Ordering::Less) => floor,
            Some(std::cmp::Ordering::Greater) => floor + 1.0,
            _ if floor % 2.0 == 0.0 => floor,
            _ => floor + 1.0,
        };
        SizeKey(rounded as i32)
    }

    /// The rounded size in points.
    pub fn points(self) -> f32 {
        self.0 as f32 / 10.0
    }
}

/// Heading levels inferred from a document's own typography.
///
/// Every distinct rounded size gets a level: the largest is H1, the next H2,
/// and so on. There are no fixed thresholds, so body text sizes receive a
/// level too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadingLevelMap {
    levels: BTreeMap<SizeKey, HeadingLevel>,
}

impl HeadingLevelMap {
    /// Build the map from every span of a document.
    pub fn from_document(doc: &Document) -> Self {
        Self::from_sizes(doc.spans().map(|span| span.font_size))
    }

    /// Build the map from raw font sizes in points.
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let distinct: BTreeSet<SizeKey> = sizes.into_iter().map(SizeKey::from_points).collect();
        let levels = distinct
            .into_iter()
            .rev()
            .enumerate()
            .map(|(rank, key)| (key, HeadingLevel::from_rank(rank)))
            .collect();
        Self { levels }
    }

    /// Level for a size in points, if that size was seen.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        self.level_for_key(SizeKey::from_points(size))
    }

    /// Level for an already rounded size.
    pub fn level_for_key(&self, key: SizeKey) -> Option<HeadingLevel> {
        self.levels.get(&key).copied()
    }

    /// Largest size seen, in points.
    pub fn largest(&self) -> Option<f32> {
        self.levels.keys().next_back().map(|key| key.points())
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check if no sizes were seen.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// (size, level) pairs from H1 downwards.
    pub fn iter(&self) -> impl Iterator<Item = (f32, HeadingLevel)> + '_ {
        self.levels
            .iter()
            .rev()
            .map(|(key, level)| (key.points(), *level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    #[test]
    fn test_size_key_rounding() {
        assert_eq!(SizeKey::from_points(11.96), SizeKey::from_points(12.0));
        assert_ne!(SizeKey::from_points(11.9), SizeKey::from_points(12.0));
        assert!((SizeKey::from_points(10.04).points() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_size_key_ties_to_even() {
        assert_eq!(SizeKey::from_points(10.25), SizeKey::from_points(10.2));
        assert_eq!(SizeKey::from_points(10.75), SizeKey::from_points(10.8));
        assert_eq!(SizeKey::from_points(0.25), SizeKey::from_points(0.2));
        // Not an exact tie in binary, so it rounds up
        assert_eq!(SizeKey::from_points(10.35), SizeKey::from_points(10.4));
    }

    #[test]
    fn test_levels_by_descending_size() {
        let map = HeadingLevelMap::from_sizes([24.0, 24.0, 18.0, 12.0]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.level_for(24.0).unwrap().to_string(), "H1");
        assert_eq!(map.level_for(18.0).unwrap().to_string(), "H2");
        assert_eq!(map.level_for(12.0).unwrap().to_string(), "H3");
        assert_eq!(map.level_for(10.0), None);
    }

    #[test]
    fn test_levels_past_third() {
        let map = HeadingLevelMap::from_sizes([30.0, 20.0, 16.0, 14.0, 12.0, 9.0]);
        let labels: Vec<String> = map.iter().map(|(_, level)| level.to_string()).collect();
        assert_eq!(labels, vec!["H1", "H2", "H3", "H4", "H5", "H6"]);
        assert_eq!(map.largest(), Some(30.0));
    }

    #[test]
    fn test_single_size_is_h1() {
        let map = HeadingLevelMap::from_sizes([11.0, 11.0, 11.0]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.level_for(11.0), Some(HeadingLevel::H1));
    }

    #[test]
    fn test_empty_document() {
        let map = HeadingLevelMap::from_document(&Document::new("empty.pdf"));
        assert!(map.is_empty());
        assert_eq!(map.largest(), None);
    }

    #[test]
    fn test_from_document_covers_all_pages() {
        let doc = Document::new("a.pdf")
            .with_page(Page::new(0).with_span("Big", 20.0))
            .with_page(Page::new(1).with_span("small", 10.04));
        let map = HeadingLevelMap::from_document(&doc);
        assert_eq!(map.level_for(20.0), Some(HeadingLevel::H1));
        assert_eq!(map.level_for(10.0).unwrap().depth(), 2);
    }
}
