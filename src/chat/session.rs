// file: src/chat/session.rs
// description: per-user conversation state passed explicitly into each exchange
// reference: append-only conversation history

use crate::chat::engine::{ChatEngine, Reply};
use crate::models::ConversationTurn;
use crate::parser::InputNormalizer;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Conversation owned by the presentation layer.
///
/// The engine never sees the history; the session records both sides of
/// each accepted exchange.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    history: Vec<ConversationTurn>,
    normalizer: InputNormalizer,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
            normalizer: InputNormalizer::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Normalizes `raw`, asks the engine and records the exchange.
    ///
    /// Invalid input is answered with a prompt to re-enter the question and
    /// leaves the history untouched.
    pub async fn ask(&mut self, engine: &ChatEngine, raw: &str) -> Reply {
        let question = self.normalizer.normalize(raw);
        self.exchange(engine, question).await
    }

    /// Like [`Session::ask`] for input of unknown type; non-strings are invalid.
    pub async fn ask_value(&mut self, engine: &ChatEngine, raw: &Value) -> Reply {
        let question = self.normalizer.normalize_value(raw);
        self.exchange(engine, question).await
    }

    async fn exchange(&mut self, engine: &ChatEngine, question: String) -> Reply {
        if question.is_empty() {
            debug!("Rejected empty question in session {}", self.id);
            return Reply::invalid_question();
        }

        self.history.push(ConversationTurn::user(question.clone()));
        let reply = engine.answer(&question).await;
        self.history.push(ConversationTurn::bot(reply.text.clone()));

        reply
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::engine::FALLBACK_UNAVAILABLE_MESSAGE;
    use crate::matching::MatchEngine;
    use crate::models::{KnowledgeBase, ReferenceEntry, Role};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn engine() -> ChatEngine {
        let kb: KnowledgeBase = ReferenceEntry::new(
            Some("What programs does Kepler offer?"),
            Some("Project Management, Business Analytics"),
            "Programs",
        )
        .into_iter()
        .collect();

        ChatEngine::new(kb, MatchEngine::default(), None)
    }

    #[test]
    fn test_exchange_records_both_turns() {
        let engine = engine();
        let mut session = Session::new();

        let reply = tokio_test::block_on(
            session.ask(&engine, "  What   programs does\nKepler offer? "),
        );

        assert_eq!(
            reply.text,
            "Project Management, Business Analytics (Source: Programs)"
        );
        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].message, "What programs does Kepler offer?");
        assert_eq!(history[1].role, Role::Bot);
        assert_eq!(history[1].message, reply.text);
    }

    #[test]
    fn test_blank_input_is_not_recorded() {
        let engine = engine();
        let mut session = Session::new();

        let reply = tokio_test::block_on(session.ask(&engine, " \n\t "));

        assert!(reply.is_invalid());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_non_text_input_is_invalid() {
        let engine = engine();
        let mut session = Session::new();

        let reply = tokio_test::block_on(session.ask_value(&engine, &json!({"q": 1})));

        assert!(reply.is_invalid());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_is_append_only_across_exchanges() {
        let engine = engine();
        let mut session = Session::new();

        tokio_test::block_on(session.ask(&engine, "What programs does Kepler offer?"));
        let reply = tokio_test::block_on(session.ask(&engine, "What is the weather today?"));

        assert_eq!(reply.text, FALLBACK_UNAVAILABLE_MESSAGE);
        let messages: Vec<&str> = session
            .history()
            .iter()
            .map(|turn| turn.message.as_str())
            .collect();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2], "What is the weather today?");
        assert_eq!(messages[3], FALLBACK_UNAVAILABLE_MESSAGE);
    }
}
