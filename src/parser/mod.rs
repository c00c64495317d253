//! PDF parsing module.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use layout::{layout_text, LayoutAnalyzer, PositionedSpan};
pub use options::{ErrorMode, ParseOptions, TextMode};
pub use pdf_parser::{check_header, PdfLoader, PdfParser};
