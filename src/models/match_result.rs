// file: src/models/match_result.rs
// description: outcome of scoring a question against the knowledge base
// reference: Used for similarity search results

use serde::{Deserialize, Serialize};

/// Accepted knowledge-base match for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Stored answer text
    pub answer: String,

    /// Source category the answer is attributed to
    pub source: String,

    /// Similarity score, 0-100
    pub score: u8,
}

impl MatchResult {
    pub fn new(answer: String, source: String, score: u8) -> Self {
        Self {
            answer,
            source,
            score,
        }
    }

    /// Answer text annotated with its source category.
    pub fn attributed_answer(&self) -> String {
        format!("{} (Source: {})", self.answer, self.source)
    }
}

/// A scored reference question, used for ranked diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Position of the entry in the knowledge base
    pub index: usize,
    pub question: String,
    pub source: String,
    pub score: u8,
}

impl ScoredCandidate {
    pub fn format_summary(&self, max_question_len: usize) -> String {
        format!(
            "Score: {:>3} | [{}] {}",
            self.score,
            self.source,
            crate::utils::Validator::truncate_text(&self.question, max_question_len)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributed_answer() {
        let result = MatchResult::new(
            "Project Management, Business Analytics".to_string(),
            "Programs".to_string(),
            100,
        );

        assert_eq!(
            result.attributed_answer(),
            "Project Management, Business Analytics (Source: Programs)"
        );
    }

    #[test]
    fn test_format_summary() {
        let candidate = ScoredCandidate {
            index: 3,
            question: "How do I apply to Kepler College as an international student?"
                .to_string(),
            source: "Admissions".to_string(),
            score: 87,
        };

        let summary = candidate.format_summary(20);
        assert!(summary.contains(" 87"));
        assert!(summary.contains("[Admissions]"));
        assert!(summary.contains("..."));
    }
}
