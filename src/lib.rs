// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod chat;
pub mod config;
pub mod error;
pub mod exporter;
pub mod fallback;
pub mod knowledge;
pub mod matching;
pub mod models;
pub mod parser;
pub mod utils;

pub use chat::{ChatEngine, Reply, ReplyKind, Session};
pub use config::{Config, FallbackConfig, KnowledgeBaseConfig, MatchingConfig};
pub use error::{ChatbotError, Result};
pub use exporter::TranscriptExporter;
pub use fallback::{FallbackGenerator, GroqFallbackClient};
pub use knowledge::KnowledgeBaseLoader;
pub use matching::{ACCEPTANCE_THRESHOLD, MatchEngine, find_best_match, token_sort_ratio};
pub use models::{ConversationTurn, KnowledgeBase, MatchResult, ReferenceEntry, Role};
pub use parser::InputNormalizer;
pub use utils::{
    FallbackStatus, KnowledgeBaseStatus, OperationTimer, Readiness, ReadinessReport, Validator,
};
