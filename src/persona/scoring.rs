//! Paragraph relevance scoring.

use super::keywords::KeywordModel;
use super::options::RankOptions;
use crate::model::{Document, SectionCandidate};
use crate::text::{clean_text_lower, split_paragraphs};

/// Non-overlapping substring occurrences of `term` in `text`.
fn count_occurrences(text: &str, term: &str) -> u64 {
    if term.is_empty() {
        return 0;
    }
    text.matches(term).count() as u64
}

/// Score a normalized, lowercased paragraph against the keyword sets.
///
/// Each occurrence of a persona term adds `persona_weight`, each occurrence
/// of a job term adds `job_weight`. Terms are matched as plain substrings, so
/// "data" also counts inside "dataset".
pub fn score_paragraph(paragraph: &str, keywords: &KeywordModel, options: &RankOptions) -> u64 {
    let persona: u64 = keywords
        .persona_terms
        .iter()
        .map(|term| count_occurrences(paragraph, term) * options.persona_weight)
        .sum();
    let job: u64 = keywords
        .job_terms
        .iter()
        .map(|term| count_occurrences(paragraph, term) * options.job_weight)
        .sum();
    persona + job
}

/// Keep the first `max_chars` characters, marking the cut with "...".
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Score every paragraph of every document, keeping those with a positive score.
///
/// Page text is normalized and lowercased before it is split, so the blank
/// lines separating layout blocks are collapsed and a page normally yields a
/// single paragraph. Candidates come out in discovery order: document order,
/// page ascending, then paragraph order within the page.
pub fn collect_candidates(
    documents: &[Document],
    keywords: &KeywordModel,
    options: &RankOptions,
) -> Vec<SectionCandidate> {
    let mut candidates = Vec::new();
    for doc in documents {
        let before = candidates.len();
        for page in &doc.pages {
            let text = clean_text_lower(&page.text);
            for paragraph in split_paragraphs(&text) {
                let score = score_paragraph(paragraph, keywords, options);
                if score == 0 {
                    continue;
                }
                candidates.push(SectionCandidate {
                    document: doc.name.clone(),
                    page: page.index,
                    section_title: truncate_title(paragraph, options.title_chars),
                    importance_score: score,
                });
            }
        }
        log::debug!(
            "{}: {} scoring paragraphs",
            doc.name,
            candidates.len() - before
        );
    }
    candidates
}
