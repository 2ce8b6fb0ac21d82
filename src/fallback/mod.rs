// file: src/fallback/mod.rs
// description: generative fallback capability used when no knowledge-base match is accepted
// reference: internal module structure

pub mod groq;

pub use groq::GroqFallbackClient;

use crate::error::Result;
use async_trait::async_trait;

/// Produces a best-effort answer to `question` from a fixed domain `context`.
#[async_trait]
pub trait FallbackGenerator: Send + Sync {
    async fn generate(&self, question: &str, context: &str) -> Result<String>;
}
