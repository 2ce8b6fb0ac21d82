// file: src/knowledge/mod.rs
// description: knowledge base loading module exports
// reference: internal module structure

pub mod loader;

pub use loader::KnowledgeBaseLoader;
