// file: src/chat/mod.rs
// description: response decision engine and conversation sessions
// reference: internal module structure

pub mod engine;
pub mod session;

pub use engine::{
    ChatEngine, DOMAIN_CONTEXT, FALLBACK_UNAVAILABLE_MESSAGE, INVALID_QUESTION_MESSAGE,
    NO_MATCH_PREFIX, Reply, ReplyKind,
};
pub use session::Session;
