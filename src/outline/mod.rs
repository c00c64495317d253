//! Heading outline extraction.
//!
//! A document is walked once in reading order. Every span that survives the
//! noise filter is classified by its rounded font size against a
//! [`HeadingLevelMap`] built from the same document, and spans on the first
//! pages also feed a [`TitleTracker`]. Consecutive pieces of the same heading
//! are merged afterwards and the title is chosen from the merged outline.
//!
//! ```
//! use docoutline::model::{Document, Page};
//! use docoutline::outline::extract_outline;
//!
//! let doc = Document::new("guide.pdf").with_page(
//!     Page::new(0)
//!         .with_span("Getting", 24.0)
//!         .with_span("Started", 24.0)
//!         .with_span("Install the tool first.", 11.0),
//! );
//!
//! let result = extract_outline(&doc);
//! assert_eq!(result.title, "Getting Started");
//! assert_eq!(result.outline.len(), 2);
//! ```

mod levels;
mod merge;
mod title;

pub use levels::{HeadingLevelMap, SizeKey};
pub use merge::merge_broken_headings;
pub use title::{finalize_title, TitleTracker, TITLE_PAGE_LIMIT, UNTITLED};

use crate::model::{Document, ExtractionResult, OutlineItem, TextSpan};
use crate::text::{clean_text, is_all_digits, is_bare_url};

/// Check whether normalized span text is layout noise rather than content.
///
/// Rejects text shorter than two characters, bare links and pure digit runs
/// (usually page numbers).
pub fn is_noise(text: &str) -> bool {
    text.chars().count() < 2 || is_bare_url(text) || is_all_digits(text)
}

/// Extract the title and heading outline of a document.
pub fn extract_outline(doc: &Document) -> ExtractionResult {
    let levels = HeadingLevelMap::from_document(doc);
    let mut pass = OutlinePass::new(&levels);
    for span in doc.spans() {
        pass.observe(span);
    }

    let raw_count = pass.outline.len();
    let (outline, tracker) = pass.finish();
    let title = finalize_title(&outline, &tracker);

    log::debug!(
        "{}: {} font sizes, {} spans kept, {} outline items after merge, title {:?}",
        doc.name,
        levels.len(),
        raw_count,
        outline.len(),
        title
    );

    ExtractionResult { title, outline }
}

/// State of the single extraction walk over a document's spans.
struct OutlinePass<'a> {
    levels: &'a HeadingLevelMap,
    outline: Vec<OutlineItem>,
    tracker: TitleTracker,
}

impl<'a> OutlinePass<'a> {
    fn new(levels: &'a HeadingLevelMap) -> Self {
        Self {
            levels,
            outline: Vec::new(),
            tracker: TitleTracker::new(),
        }
    }

    fn observe(&mut self, span: &TextSpan) {
        let text = clean_text(&span.text);
        if is_noise(&text) {
            return;
        }
        let size = SizeKey::from_points(span.font_size);

        if span.page_index < TITLE_PAGE_LIMIT {
            self.tracker.observe(&text, size);
        }

        if let Some(level) = self.levels.level_for_key(size) {
            self.outline
                .push(OutlineItem::new(level, text, span.page_index));
        }
    }

    fn finish(self) -> (Vec<OutlineItem>, TitleTracker) {
        (merge_broken_headings(self.outline), self.tracker)
    }
}
