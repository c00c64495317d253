//! Source document types.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A run of text sharing one font size, as reported by the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Raw text content
    pub text: String,

    /// Effective font size in points
    pub font_size: f32,

    /// Page the span was found on (0-based)
    pub page_index: usize,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, font_size: f32, page_index: usize) -> Self {
        Self {
            text: text.into(),
            font_size,
            page_index,
        }
    }
}

/// A single page of a source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,

    /// Text spans in reading order
    pub spans: Vec<TextSpan>,

    /// Whole-page plain text, paragraphs separated by blank lines
    pub text: String,
}

impl Page {
    /// Create an empty page.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            spans: Vec::new(),
            text: String::new(),
        }
    }

    /// Append a span with the given text and size, tagged with this page's index.
    pub fn push_span(&mut self, text: impl Into<String>, font_size: f32) {
        self.spans.push(TextSpan::new(text, font_size, self.index));
    }

    /// Builder-style variant of [`Page::push_span`].
    pub fn with_span(mut self, text: impl Into<String>, font_size: f32) -> Self {
        self.push_span(text, font_size);
        self
    }

    /// Set the whole-page plain text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Check if the page carries neither spans nor text.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty() && self.text.trim().is_empty()
    }
}

/// A loaded source document: an ordered list of pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// File name of the document (e.g. "report.pdf")
    pub name: String,

    /// Pages in order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Builder-style variant of [`Document::add_page`].
    pub fn with_page(mut self, page: Page) -> Self {
        self.add_page(page);
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All spans in reading order: page ascending, then span order within the page.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|page| page.spans.iter())
    }

    /// Total number of spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|page| page.spans.len()).sum()
    }
}

/// Something that can turn a path into a [`Document`].
///
/// The batch driver receives one of these instead of touching the PDF
/// backend directly, so the pipelines can be exercised with in-memory
/// documents.
pub trait DocumentLoader {
    /// Load the document at `path`.
    fn load(&self, path: &Path) -> Result<Document>;
}

impl<F> DocumentLoader for F
where
    F: Fn(&Path) -> Result<Document>,
{
    fn load(&self, path: &Path) -> Result<Document> {
        self(path)
    }
}
