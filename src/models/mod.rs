// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod conversation;
pub mod entry;
pub mod match_result;

pub use conversation::{ConversationTurn, Role};
pub use entry::{KnowledgeBase, ReferenceEntry};
pub use match_result::{MatchResult, ScoredCandidate};
