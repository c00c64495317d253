//! Merging of headings split across spans.

use crate::model::OutlineItem;
use crate::text::clean_text;

/// Collapse runs of consecutive items that share level and page into one.
///
/// Only the last merged item is compared, so a level that recurs on the same
/// page after a different level starts a new entry. Merging an already merged
/// outline returns it unchanged.
pub fn merge_broken_headings(items: Vec<OutlineItem>) -> Vec<OutlineItem> {
    let mut merged: Vec<OutlineItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.last_mut() {
            Some(last) if last.level == item.level && last.page == item.page => {
                let joined = format!("{} {}", last.text, item.text);
                last.text = clean_text(&joined);
            }
            _ => merged.push(item),
        }
    }
    merged
}
