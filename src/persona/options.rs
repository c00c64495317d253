//! Ranking options and configuration.

use std::sync::Arc;

use super::keywords::SynonymTable;

/// Options for persona ranking.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Maximum number of sections emitted
    pub top_n: usize,

    /// Characters of paragraph text kept in `section_title`
    pub title_chars: usize,

    /// Weight of each persona-term occurrence
    pub persona_weight: u64,

    /// Weight of each job-term occurrence
    pub job_weight: u64,

    /// Synonym table used for keyword expansion
    pub synonyms: Arc<SynonymTable>,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections kept.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the title truncation length.
    pub fn with_title_chars(mut self, chars: usize) -> Self {
        self.title_chars = chars;
        self
    }

    /// Set persona and job weights.
    pub fn with_weights(mut self, persona: u64, job: u64) -> Self {
        self.persona_weight = persona;
        self.job_weight = job;
        self
    }

    /// Use a custom synonym table.
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = Arc::new(synonyms);
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            title_chars: 80,
            persona_weight: 1,
            job_weight: 3,
            synonyms: SynonymTable::builtin(),
        }
    }
}
