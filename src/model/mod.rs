//! Document model types.
//!
//! The input side ([`Document`], [`Page`], [`TextSpan`]) is what the PDF
//! collaborator produces and what the analyzers consume. The output side
//! ([`ExtractionResult`], [`RankedOutput`]) mirrors the JSON documents
//! written for downstream tooling.

mod document;
mod outline;
mod persona;

pub use document::{Document, DocumentLoader, Page, TextSpan};
pub use outline::{ExtractionResult, HeadingLevel, OutlineItem};
pub use persona::{
    OutputMetadata, Persona, PersonaRequest, RankedOutput, RankedSection, SectionCandidate,
};
