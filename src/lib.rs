//! # docoutline
//!
//! Structure and relevance extraction for PDF documents.
//!
//! Two pipelines share one document model:
//!
//! - **Outline extraction**: every distinct font size becomes a heading
//!   level (largest = `H1`), heading fragments split across spans are merged
//!   and a title is chosen from the largest text near the top of the document.
//! - **Persona ranking**: paragraphs across a batch of documents are scored
//!   by keyword overlap with a persona and a task, and the best are ranked.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{extract_outline_from_file, render};
//!
//! fn main() -> docoutline::Result<()> {
//!     let result = extract_outline_from_file("report.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! Both pipelines work on [`Document`] values, so they can be driven from
//! any source implementing [`DocumentLoader`]:
//!
//! ```
//! use docoutline::{Document, Page, Persona, PersonaRanker, PersonaRequest};
//!
//! let doc = Document::new("notes.pdf")
//!     .with_page(Page::new(0).with_text("Our methodology."))
//!     .with_page(Page::new(1).with_text("Unrelated text."));
//! let request = PersonaRequest::new(
//!     Persona::new("Researcher", "Biology", ["methods"]),
//!     "Compare methodology",
//! );
//!
//! let output = PersonaRanker::new().rank(&[doc], &request);
//! assert_eq!(output.extracted_sections.len(), 1);
//! assert_eq!(output.extracted_sections[0].section_title, "our methodology.");
//! ```

pub mod batch;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod persona;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use batch::{extract_outlines, list_pdfs, load_persona_request, rank_directory, BatchReport};
pub use error::{Error, Result};
pub use model::{
    Document, DocumentLoader, ExtractionResult, HeadingLevel, OutlineItem, OutputMetadata, Page,
    Persona, PersonaRequest, RankedOutput, RankedSection, TextSpan,
};
pub use outline::{extract_outline, HeadingLevelMap};
pub use parser::{ErrorMode, ParseOptions, PdfLoader, PdfParser, TextMode};
pub use persona::{PersonaRanker, RankOptions, SynonymTable};
pub use render::JsonFormat;

use std::path::Path;

/// Parse a PDF file into a [`Document`].
///
/// # Example
///
/// ```no_run
/// use docoutline::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    PdfParser::open(path)?.parse()
}

/// Parse a PDF file with custom options.
///
/// ```no_run
/// use docoutline::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_max_pages(10);
/// let doc = parse_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    PdfParser::open_with_options(path, options)?.parse()
}

/// Parse a PDF held in memory. `name` becomes the document name.
pub fn parse_bytes(name: &str, data: &[u8]) -> Result<Document> {
    PdfParser::from_bytes(name, data)?.parse()
}

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_outline_from_file;
///
/// let result = extract_outline_from_file("report.pdf").unwrap();
/// println!("{}", result.title);
/// for item in &result.outline {
///     println!("{} {} (page {})", item.level, item.text, item.page);
/// }
/// ```
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    let doc = parse_file(path)?;
    Ok(extract_outline(&doc))
}

/// Extract an outline and serialize it to JSON.
pub fn outline_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = extract_outline_from_file(path)?;
    render::to_json(&result, format)
}
