//! Error types for docoutline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, analyzing or rendering documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A source document could not be opened or read.
    #[error("Failed to open {}: {source}", path.display())]
    DocumentOpen {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// A required input file or field is absent.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// An input file is present but malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Wrap an error with the path of the document that caused it.
    pub fn document_open(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::DocumentOpen {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_document_open_names_file() {
        let err = Error::document_open("input/report.pdf", Error::UnknownFormat);
        let message = err.to_string();
        assert!(message.contains("report.pdf"));
        assert!(message.contains("not a valid PDF"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
