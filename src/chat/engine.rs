// file: src/chat/engine.rs
// description: accept-or-fallback decision over knowledge-base matches
// reference: knowledge base first, generative fallback second

use crate::error::ChatbotError;
use crate::fallback::FallbackGenerator;
use crate::matching::MatchEngine;
use crate::models::KnowledgeBase;
use serde::Serialize;
use tracing::{info, warn};

/// Fixed description of the domain handed to the fallback generator.
pub const DOMAIN_CONTEXT: &str = "Kepler College is a higher learning institution in Rwanda \
offering programs in Project Management, Business Analytics, and degrees through a \
partnership with Southern New Hampshire University (SNHU).";

pub const NO_MATCH_PREFIX: &str =
    "Sorry, I couldn't find a close match in the dataset. Based on general knowledge: ";

pub const FALLBACK_UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't find an answer in the dataset, and the AI model is unavailable.";

pub const INVALID_QUESTION_MESSAGE: &str = "Please enter a valid question.";

/// How a reply was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyKind {
    KnowledgeBase { source: String },
    Fallback,
    FallbackUnavailable,
    FallbackFailed { reason: String },
    InvalidQuestion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
    /// Highest similarity score seen while matching
    pub score: u8,
}

impl Reply {
    pub fn invalid_question() -> Self {
        Self {
            text: INVALID_QUESTION_MESSAGE.to_string(),
            kind: ReplyKind::InvalidQuestion,
            score: 0,
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == ReplyKind::InvalidQuestion
    }
}

/// Answers normalized questions from the knowledge base, delegating to the
/// fallback generator when no entry is close enough.
///
/// Holds no per-conversation state; every call is independent.
pub struct ChatEngine {
    knowledge_base: KnowledgeBase,
    matcher: MatchEngine,
    fallback: Option<Box<dyn FallbackGenerator>>,
}

impl ChatEngine {
    pub fn new(
        knowledge_base: KnowledgeBase,
        matcher: MatchEngine,
        fallback: Option<Box<dyn FallbackGenerator>>,
    ) -> Self {
        Self {
            knowledge_base,
            matcher,
            fallback,
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn matcher(&self) -> &MatchEngine {
        &self.matcher
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Produces the final response text for an already-normalized question.
    ///
    /// Never fails: fallback errors are folded into the reply text.
    pub async fn answer(&self, question: &str) -> Reply {
        if question.is_empty() {
            return Reply::invalid_question();
        }

        let (best, score) = self.matcher.find_best_match(question, &self.knowledge_base);

        match best {
            Some(best) if self.matcher.accepts(Some(&best), score) => {
                info!("Answered from knowledge base ({}, score {})", best.source, score);
                return Reply {
                    text: best.attributed_answer(),
                    kind: ReplyKind::KnowledgeBase {
                        source: best.source,
                    },
                    score,
                };
            }
            _ => {}
        }

        info!("No knowledge base match (best score {}), using fallback", score);
        self.answer_with_fallback(question, score).await
    }

    async fn answer_with_fallback(&self, question: &str, score: u8) -> Reply {
        let Some(generator) = self.fallback.as_deref() else {
            return unavailable(score);
        };

        match generator.generate(question, DOMAIN_CONTEXT).await {
            Ok(text) => Reply {
                text: format!("{}{}", NO_MATCH_PREFIX, text),
                kind: ReplyKind::Fallback,
                score,
            },
            Err(ChatbotError::FallbackTimeout(secs)) => {
                warn!("Fallback timed out after {}s", secs);
                unavailable(score)
            }
            Err(e) => {
                warn!("Fallback failed: {}", e);
                let reason = e.to_string();
                Reply {
                    text: format!("Sorry, the AI model could not answer: {}", reason),
                    kind: ReplyKind::FallbackFailed { reason },
                    score,
                }
            }
        }
    }
}

fn unavailable(score: u8) -> Reply {
    Reply {
        text: FALLBACK_UNAVAILABLE_MESSAGE.to_string(),
        kind: ReplyKind::FallbackUnavailable,
        score,
    }
}
