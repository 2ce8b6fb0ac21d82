// file: src/parser/mod.rs
// description: user input parsing module exports
// reference: internal module structure

pub mod normalizer;

pub use normalizer::InputNormalizer;
