//! PDF document parser using lopdf.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{Document, DocumentLoader, Page};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::{layout_text, LayoutAnalyzer};
use super::options::{ParseOptions, TextMode};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Validate the file header and return the declared version (e.g. "1.7").
///
/// Anything not starting with `%PDF-` is [`Error::UnknownFormat`]; a version
/// that is not of the form `d.d` is [`Error::UnsupportedVersion`].
pub fn check_header(data: &[u8]) -> Result<String> {
    if !data.starts_with(PDF_MAGIC) || data.len() < PDF_MAGIC.len() + 3 {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + 3];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    match version_bytes {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(version),
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// PDF document parser.
///
/// Produces a [`Document`] whose spans feed outline extraction and whose page
/// text feeds persona ranking.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    name: String,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    ///
    /// The document is named after the file name.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes_with_options(name, &data, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(name, data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(
        name: impl Into<String>,
        data: &[u8],
        options: ParseOptions,
    ) -> Result<Self> {
        let version = check_header(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        let name = name.into();
        log::debug!("{}: PDF {} loaded", name, version);
        Ok(Self::with_backend(name, backend, options))
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Wrap an already opened backend.
    pub fn with_backend(name: impl Into<String>, backend: B, options: ParseOptions) -> Self {
        Self {
            backend,
            name: name.into(),
            options,
        }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.backend.pages().len()
    }

    /// Parse the document. Page indices in the result are 0-based.
    pub fn parse(&self) -> Result<Document> {
        if self.backend.is_encrypted() {
            log::warn!("{}: document is encrypted, text may be unreadable", self.name);
        }

        let mut document = Document::new(self.name.clone());
        let limit = match self.options.max_pages {
            0 => usize::MAX,
            n => n,
        };

        for (index, page_num) in self.backend.pages().into_keys().take(limit).enumerate() {
            match self.parse_page(index, page_num) {
                Ok(page) => document.add_page(page),
                Err(e) if self.options.is_lenient() => {
                    log::warn!("{}: skipping page {}: {}", self.name, page_num, e);
                    document.add_page(Page::new(index));
                }
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "{}: {} pages, {} spans",
            self.name,
            document.page_count(),
            document.span_count()
        );
        Ok(document)
    }

    fn parse_page(&self, index: usize, page_num: u32) -> Result<Page> {
        let positioned = LayoutAnalyzer::new(&self.backend).extract_page_spans(page_num)?;

        let text = match self.options.text_mode {
            TextMode::Layout => layout_text(&positioned),
            TextMode::Raw => self.backend.extract_text(page_num)?,
        };

        let mut page = Page::new(index).with_text(text);
        for span in positioned {
            page.push_span(span.text, span.font_size);
        }
        Ok(page)
    }
}

/// [`DocumentLoader`] that reads PDF files from disk.
///
/// Failures are wrapped in [`Error::DocumentOpen`] naming the file.
#[derive(Debug, Clone, Default)]
pub struct PdfLoader {
    options: ParseOptions,
}

impl PdfLoader {
    /// Create a loader with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<Document> {
        PdfParser::open_with_options(path, self.options.clone())
            .and_then(|parser| parser.parse())
            .map_err(|e| Error::document_open(PathBuf::from(path), e))
    }
}
