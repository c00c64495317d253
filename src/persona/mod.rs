//! Persona-driven section ranking.
//!
//! Paragraphs of a batch of documents are scored by how often the persona's
//! and the task's keywords (expanded through a [`SynonymTable`]) occur in
//! them, and the best ones are returned with a dense 1-based rank.

mod keywords;
mod options;
mod ranking;
mod scoring;

pub use keywords::{KeywordModel, SynonymGroup, SynonymTable};
pub use options::RankOptions;
pub use ranking::rank_candidates;
pub use scoring::{collect_candidates, score_paragraph, truncate_title};

use chrono::{Local, NaiveDateTime};

use crate::model::{Document, OutputMetadata, PersonaRequest, RankedOutput};

/// Format of the `timestamp` metadata field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Ranks document sections for a persona and task.
#[derive(Debug, Clone, Default)]
pub struct PersonaRanker {
    options: RankOptions,
}

impl PersonaRanker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with custom options.
    pub fn with_options(options: RankOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank sections, stamping the output with the current local time.
    pub fn rank(&self, documents: &[Document], request: &PersonaRequest) -> RankedOutput {
        self.rank_at(documents, request, Local::now().naive_local())
    }

    /// Rank sections, stamping the output with `timestamp`.
    pub fn rank_at(
        &self,
        documents: &[Document],
        request: &PersonaRequest,
        timestamp: NaiveDateTime,
    ) -> RankedOutput {
        let keywords = KeywordModel::from_request(request, &self.options.synonyms);
        log::debug!(
            "{} persona terms, {} job terms",
            keywords.persona_terms.len(),
            keywords.job_terms.len()
        );

        let candidates = collect_candidates(documents, &keywords, &self.options);
        let total = candidates.len();
        let extracted_sections = rank_candidates(candidates, self.options.top_n);
        log::debug!(
            "ranked {} of {} candidate sections across {} documents",
            extracted_sections.len(),
            total,
            documents.len()
        );

        RankedOutput {
            metadata: OutputMetadata {
                documents: documents.iter().map(|doc| doc.name.clone()).collect(),
                persona: request.persona.clone(),
                job_to_be_done: request.job_to_be_done.clone(),
                timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            },
            extracted_sections,
        }
    }
}
