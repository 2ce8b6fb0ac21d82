// file: src/matching/mod.rs
// description: question similarity scoring and best-match selection
// reference: internal module structure

pub mod engine;
pub mod similarity;

pub use engine::{ACCEPTANCE_THRESHOLD, MatchEngine, find_best_match};
pub use similarity::{token_sort_key, token_sort_ratio};
