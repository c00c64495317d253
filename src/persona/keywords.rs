//! Keyword sets derived from a persona and a task.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use crate::model::PersonaRequest;
use crate::text::tokenize;

/// Groups shipped with the library: canonical term and related terms.
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("methodology", &["approach", "technique", "procedure"]),
    ("dataset", &["data", "corpus", "records"]),
    ("performance", &["accuracy", "efficiency", "results"]),
    ("analysis", &["evaluation", "examination", "assessment"]),
    ("review", &["survey", "summary", "overview"]),
];

/// A canonical term and the terms treated as related to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    /// Canonical term
    pub canonical: String,
    /// Related terms
    pub related: Vec<String>,
}

impl SynonymGroup {
    fn contains(&self, keyword: &str) -> bool {
        self.canonical == keyword || self.related.iter().any(|term| term == keyword)
    }

    fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.related.iter().map(String::as_str))
    }
}

/// Fixed synonym configuration used for keyword expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table, shared for the life of the process.
    pub fn builtin() -> Arc<SynonymTable> {
        static TABLE: OnceLock<Arc<SynonymTable>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                let table = BUILTIN_GROUPS
                    .iter()
                    .fold(SynonymTable::new(), |table, (canonical, related)| {
                        table.with_group(*canonical, related.iter().copied())
                    });
                Arc::new(table)
            })
            .clone()
    }

    /// Add a group.
    pub fn with_group(
        mut self,
        canonical: impl Into<String>,
        related: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.groups.push(SynonymGroup {
            canonical: canonical.into(),
            related: related.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// The configured groups.
    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    /// Expand keywords with every group they belong to.
    ///
    /// The input keywords are always kept. A keyword matching a group's
    /// canonical term or any related term pulls in the whole group; the
    /// added terms are not expanded again.
    pub fn expand<I, S>(&self, keywords: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded = BTreeSet::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            for group in self.groups.iter().filter(|g| g.contains(keyword)) {
                expanded.extend(group.terms().map(str::to_string));
            }
            expanded.insert(keyword.to_string());
        }
        expanded
    }
}

/// Expanded persona and job keyword sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordModel {
    /// Terms from the persona's role, expertise and focus areas
    pub persona_terms: BTreeSet<String>,
    /// Terms from the job to be done
    pub job_terms: BTreeSet<String>,
}

impl KeywordModel {
    /// Build both keyword sets for a request.
    pub fn from_request(request: &PersonaRequest, synonyms: &SynonymTable) -> Self {
        let persona = &request.persona;
        let persona_keywords: BTreeSet<String> = tokenize(persona.role())
            .into_iter()
            .chain(tokenize(persona.expertise()))
            .chain(persona.focus_areas().iter().flat_map(|area| tokenize(area)))
            .collect();

        Self {
            persona_terms: synonyms.expand(&persona_keywords),
            job_terms: synonyms.expand(tokenize(&request.job_to_be_done)),
        }
    }

    /// Check if neither set has any term.
    pub fn is_empty(&self) -> bool {
        self.persona_terms.is_empty() && self.job_terms.is_empty()
    }
}
