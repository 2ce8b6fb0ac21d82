// file: src/matching/engine.rs
// description: best-match selection over the knowledge base under an acceptance threshold
// reference: global linear scan with first-wins tie-breaking

use crate::matching::similarity::{indel_ratio, token_sort_key};
use crate::models::{KnowledgeBase, MatchResult, ScoredCandidate};
use tracing::debug;

/// Minimum similarity score required to trust a knowledge-base answer.
///
/// Used both as the scan cutoff and as the accept/fallback decision cutoff.
pub const ACCEPTANCE_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEngine {
    threshold: u8,
}

impl MatchEngine {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// See [`find_best_match`].
    pub fn find_best_match(
        &self,
        question: &str,
        knowledge_base: &KnowledgeBase,
    ) -> (Option<MatchResult>, u8) {
        find_best_match(question, knowledge_base, self.threshold)
    }

    /// Whether an engine result should be answered from the knowledge base.
    pub fn accepts(&self, best: Option<&MatchResult>, highest_score: u8) -> bool {
        best.is_some() && highest_score >= self.threshold
    }

    /// Every entry scored against `question`, best first. Equal scores keep
    /// knowledge-base order.
    pub fn rank(
        &self,
        question: &str,
        knowledge_base: &KnowledgeBase,
        limit: usize,
    ) -> Vec<ScoredCandidate> {
        let query_key = token_sort_key(question);

        let mut candidates: Vec<ScoredCandidate> = knowledge_base
            .iter()
            .enumerate()
            .map(|(index, entry)| ScoredCandidate {
                index,
                question: entry.question.clone(),
                source: entry.source.clone(),
                score: indel_ratio(&query_key, &token_sort_key(&entry.question)),
            })
            .collect();

        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(limit);
        candidates
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(ACCEPTANCE_THRESHOLD)
    }
}

/// Scores `question` against every entry and returns the accepted match, if
/// any, together with the highest score seen.
///
/// An entry replaces the current best only when its score reaches
/// `threshold` and is strictly greater than the best so far, which starts at
/// 0. The earliest entry wins a tie and a zero score is never a match. The
/// returned score is the highest over the whole scan and equals the match
/// score whenever a match is returned. An empty
/// knowledge base yields `(None, 0)`.
pub fn find_best_match(
    question: &str,
    knowledge_base: &KnowledgeBase,
    threshold: u8,
) -> (Option<MatchResult>, u8) {
    let query_key = token_sort_key(question);

    let mut best: Option<MatchResult> = None;
    let mut best_score = 0u8;
    let mut highest_score = 0u8;

    for entry in knowledge_base.iter() {
        let score = indel_ratio(&query_key, &token_sort_key(&entry.question));
        highest_score = highest_score.max(score);

        // best_score starts at 0, so a zero score never matches
        if score >= threshold && score > best_score {
            best_score = score;
            best = Some(MatchResult::new(
                entry.answer.clone(),
                entry.source.clone(),
                score,
            ));
        }
    }

    debug!(
        "Best match for {:?}: score {} ({})",
        question,
        highest_score,
        if best.is_some() { "accepted" } else { "rejected" }
    );

    (best, highest_score)
}
