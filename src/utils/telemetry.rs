// file: src/utils/telemetry.rs
// description: readiness reporting for the answer paths and stage timing
// reference: knowledge base and fallback availability checks

use crate::error::Result;
use crate::models::KnowledgeBase;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// State of the knowledge base answer path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KnowledgeBaseStatus {
    Loaded { entries: usize, categories: usize },
    Empty,
    Unreadable { reason: String },
}

impl KnowledgeBaseStatus {
    pub fn from_load(result: &Result<KnowledgeBase>) -> Self {
        match result {
            Ok(kb) if kb.is_empty() => Self::Empty,
            Ok(kb) => Self::Loaded {
                entries: kb.len(),
                categories: kb.category_counts().len(),
            },
            Err(e) => Self::Unreadable {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// State of the generative fallback path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FallbackStatus {
    Configured { model: String },
    NotConfigured,
    Misconfigured { reason: String },
}

impl FallbackStatus {
    /// `client` is the outcome of building the fallback client; `Ok(None)`
    /// means it is disabled or has no API key.
    pub fn from_client<T>(client: &Result<Option<T>>, model: &str) -> Self {
        match client {
            Ok(Some(_)) => Self::Configured {
                model: model.to_string(),
            },
            Ok(None) => Self::NotConfigured,
            Err(e) => Self::Misconfigured {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Readiness {
    /// Both answer paths work.
    Ready,
    /// One path works; the other degrades to empty or unavailable answers.
    Degraded,
    /// Every question would get the unavailable message.
    NotReady,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub knowledge_base: KnowledgeBaseStatus,
    pub fallback: FallbackStatus,
    pub threshold: u8,
    pub checked_at: DateTime<Utc>,
    pub version: String,
}

impl ReadinessReport {
    pub fn new(
        knowledge_base: KnowledgeBaseStatus,
        fallback: FallbackStatus,
        threshold: u8,
    ) -> Self {
        Self {
            knowledge_base,
            fallback,
            threshold,
            checked_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn readiness(&self) -> Readiness {
        match (self.knowledge_base.is_usable(), self.fallback.is_usable()) {
            (true, true) => Readiness::Ready,
            (false, false) => Readiness::NotReady,
            _ => Readiness::Degraded,
        }
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "Kepler chatbot {}: {:?}\nChecked: {}\n\n",
            self.version,
            self.readiness(),
            self.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        let kb_line = match &self.knowledge_base {
            KnowledgeBaseStatus::Loaded {
                entries,
                categories,
            } => format!(
                "✓ knowledge base: {} entries in {} categories, accepting scores >= {}",
                entries, categories, self.threshold
            ),
            KnowledgeBaseStatus::Empty => {
                "⚠ knowledge base: no usable entries, every question goes to the fallback".to_string()
            }
            KnowledgeBaseStatus::Unreadable { reason } => {
                format!("✗ knowledge base: {}", reason)
            }
        };
        output.push_str(&kb_line);
        output.push('\n');

        let fallback_line = match &self.fallback {
            FallbackStatus::Configured { model } => format!("✓ fallback: {}", model),
            FallbackStatus::NotConfigured => {
                "⚠ fallback: not configured (set GROQ_API_KEY or fallback.api_key), unmatched questions get the unavailable message".to_string()
            }
            FallbackStatus::Misconfigured { reason } => format!("✗ fallback: {}", reason),
        };
        output.push_str(&fallback_line);
        output.push('\n');

        output
    }
}

/// Times one stage and logs its duration when finished, warning when a
/// budget is set and exceeded.
pub struct OperationTimer {
    stage: &'static str,
    started: Instant,
    budget: Option<Duration>,
}

impl OperationTimer {
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            started: Instant::now(),
            budget: None,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();

        match self.budget {
            Some(budget) if elapsed > budget => warn!(
                "{} took {}ms, over its {}ms budget",
                self.stage,
                elapsed.as_millis(),
                budget.as_millis()
            ),
            _ => debug!("{} finished in {}ms", self.stage, elapsed.as_millis()),
        }

        elapsed
    }
}
