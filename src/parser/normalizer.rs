// file: src/parser/normalizer.rs
// description: canonicalization of raw user questions before matching
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref WHITESPACE_RUN: Regex =
        Regex::new(r"\s+").expect("WHITESPACE_RUN regex is valid");
}

/// Trims user input and collapses whitespace runs into single spaces.
///
/// Case is preserved; folding happens only inside the similarity scorer so
/// the question is echoed back the way it was typed.
#[derive(Debug, Clone, Copy)]
pub struct InputNormalizer;

impl InputNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> String {
        WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
    }

    /// Normalizes an untyped value. Anything other than a JSON string yields
    /// an empty string, which callers treat as "no question asked".
    pub fn normalize_value(&self, raw: &Value) -> String {
        match raw {
            Value::String(text) => self.normalize(text),
            _ => String::new(),
        }
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
