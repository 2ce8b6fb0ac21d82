// file: src/utils/validation.rs
// description: data validation utilities and helpers
// reference: input validation patterns

use crate::error::{ChatbotError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_knowledge_base_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ChatbotError::Validation(format!(
                "Knowledge base file does not exist: {}",
                path.display()
            )));
        }

        if !path.is_file() {
            return Err(ChatbotError::Validation(format!(
                "Knowledge base path is not a file: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(ChatbotError::Validation(format!(
                "Knowledge base file is not JSON: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_threshold(threshold: u8) -> Result<()> {
        if threshold > 100 {
            return Err(ChatbotError::Validation(format!(
                "Threshold must be within 0..=100, got {}",
                threshold
            )));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChatbotError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        }
    }
}
