//! Persona ranking input and output types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The reader the ranking is done for.
///
/// Fields the analyzer does not use are kept in `extra` so the persona can be
/// echoed back unchanged in the output metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Job title or role, e.g. "PhD Researcher"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Domain of expertise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,

    /// Topics the reader cares about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_areas: Option<Vec<String>>,

    /// Any other fields present in the input
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Persona {
    /// Create a persona from its three descriptive attributes.
    pub fn new(
        role: impl Into<String>,
        expertise: impl Into<String>,
        focus_areas: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            role: Some(role.into()),
            expertise: Some(expertise.into()),
            focus_areas: Some(focus_areas.into_iter().map(Into::into).collect()),
            extra: Map::new(),
        }
    }

    /// Role, or the empty string when absent.
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or_default()
    }

    /// Expertise, or the empty string when absent.
    pub fn expertise(&self) -> &str {
        self.expertise.as_deref().unwrap_or_default()
    }

    /// Focus areas, or an empty slice when absent.
    pub fn focus_areas(&self) -> &[String] {
        self.focus_areas.as_deref().unwrap_or_default()
    }
}

/// Persona input file: `{ "persona": {...}, "job_to_be_done": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRequest {
    /// Who the ranking is for
    pub persona: Persona,

    /// What they are trying to accomplish
    pub job_to_be_done: String,
}

impl PersonaRequest {
    /// Create a new request.
    pub fn new(persona: Persona, job_to_be_done: impl Into<String>) -> Self {
        Self {
            persona,
            job_to_be_done: job_to_be_done.into(),
        }
    }
}

/// A scored paragraph before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCandidate {
    /// Document file name
    pub document: String,

    /// Page index (0-based)
    pub page: usize,

    /// Paragraph text, truncated for display
    pub section_title: String,

    /// Relevance score, only used for ordering
    pub importance_score: u64,
}

/// A ranked paragraph as emitted in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Document file name
    pub document: String,

    /// Page index (0-based)
    pub page: usize,

    /// Paragraph text, truncated for display
    pub section_title: String,

    /// 1-based rank
    pub importance_rank: usize,
}

/// Run metadata echoed in the ranking output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetadata {
    /// File names of every document considered
    pub documents: Vec<String>,

    /// The persona as given
    pub persona: Persona,

    /// The task as given
    pub job_to_be_done: String,

    /// Local time of the run, `YYYY-MM-DDTHH:MM:SS`
    pub timestamp: String,
}

/// Complete ranking output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOutput {
    /// Run metadata
    pub metadata: OutputMetadata,

    /// Top-ranked sections
    pub extracted_sections: Vec<RankedSection>,
}
