//! Ranking and truncation of scored sections.

use crate::model::{RankedSection, SectionCandidate};

/// Order candidates by descending score and keep the first `top_n`.
///
/// The sort is stable, so equal scores keep discovery order. Ranks are
/// 1-based positions in the sorted list and the score is dropped.
pub fn rank_candidates(mut candidates: Vec<SectionCandidate>, top_n: usize) -> Vec<RankedSection> {
    candidates.sort_by(|a, b| b.importance_score.cmp(&a.importance_score));
    candidates
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, candidate)| RankedSection {
            document: candidate.document,
            page: candidate.page,
            section_title: candidate.section_title,
            importance_rank: i + 1,
        })
        .collect()
}
