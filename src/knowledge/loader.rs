// file: src/knowledge/loader.rs
// description: loads and cleans the question/answer knowledge base from JSON
// reference: https://docs.rs/serde_json

use crate::config::KnowledgeBaseConfig;
use crate::error::{ChatbotError, Result};
use crate::models::{KnowledgeBase, ReferenceEntry};
use crate::utils::{OperationTimer, Validator};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One category section of the knowledge base file.
#[derive(Debug, Deserialize)]
struct RawSection {
    source: String,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

/// Fields stay untyped so that non-string cells can be dropped row by row
/// instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    question: Value,
    #[serde(default)]
    answer: Value,
}

pub struct KnowledgeBaseLoader {
    config: KnowledgeBaseConfig,
}

impl KnowledgeBaseLoader {
    pub fn new(config: KnowledgeBaseConfig) -> Self {
        Self { config }
    }

    pub fn load(&self) -> Result<KnowledgeBase> {
        let path = self.config.path.as_path();
        let timer = OperationTimer::start("knowledge base load");

        Validator::validate_knowledge_base_file(path)?;
        let contents = fs::read_to_string(path).map_err(|e| ChatbotError::KnowledgeBase {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let knowledge_base = self.parse(&contents, path)?;
        let elapsed = timer.finish();

        info!(
            "Loaded {} entries from {} in {}ms",
            knowledge_base.len(),
            path.display(),
            elapsed.as_millis()
        );

        Ok(knowledge_base)
    }

    /// Loads the knowledge base, degrading to an empty one on any failure so
    /// that every question still gets an answer through the fallback path.
    pub fn load_or_empty(&self) -> KnowledgeBase {
        match self.load() {
            Ok(knowledge_base) => knowledge_base,
            Err(e) => {
                warn!("Error loading knowledge base: {}", e);
                KnowledgeBase::empty()
            }
        }
    }

    pub fn parse(&self, contents: &str, path: &Path) -> Result<KnowledgeBase> {
        let sections: Vec<RawSection> =
            serde_json::from_str(contents).map_err(|e| ChatbotError::KnowledgeBase {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let selected = self.select_sections(&sections);

        let mut entries = Vec::new();
        let mut dropped = 0usize;

        for section in selected {
            for raw in &section.entries {
                let entry =
                    ReferenceEntry::new(raw.question.as_str(), raw.answer.as_str(), &section.source);

                match entry {
                    Some(entry) => entries.push(entry),
                    None => dropped += 1,
                }
            }
        }

        if dropped > 0 {
            warn!(
                "Dropped {} entries with missing or blank question/answer from {}",
                dropped,
                path.display()
            );
        }

        Ok(KnowledgeBase::new(entries))
    }

    /// Sections in configured category order, or file order when no
    /// categories are configured.
    fn select_sections<'a>(&self, sections: &'a [RawSection]) -> Vec<&'a RawSection> {
        if self.config.categories.is_empty() {
            return sections.iter().collect();
        }

        let mut selected = Vec::new();

        for category in &self.config.categories {
            let matching: Vec<&RawSection> = sections
                .iter()
                .filter(|section| section.source.trim() == category.trim())
                .collect();

            if matching.is_empty() {
                warn!("Category '{}' not found in knowledge base", category);
            }

            selected.extend(matching);
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[
        {
            "source": "Admissions",
            "entries": [
                {"question": "How do I apply?", "answer": "Apply online."},
                {"question": "   ", "answer": "blank question"},
                {"question": 42, "answer": "numeric question"},
                {"answer": "missing question"}
            ]
        },
        {
            "source": "Programs",
            "entries": [
                {"question": " What programs does Kepler offer? ", "answer": " Project Management, Business Analytics "},
                {"question": "Is there a nursing program?", "answer": null}
            ]
        }
    ]"#;

    fn loader(categories: &[&str]) -> KnowledgeBaseLoader {
        KnowledgeBaseLoader::new(KnowledgeBaseConfig {
            path: PathBuf::from("faq.json"),
            categories: categories.iter().map(|c| c.to_string()).collect(),
        })
    }

    #[test]
    fn test_parse_cleans_entries() {
        let kb = loader(&[]).parse(SAMPLE, Path::new("faq.json")).unwrap();

        assert_eq!(kb.len(), 2);
        assert_eq!(kb.entries()[0].question, "How do I apply?");
        assert_eq!(kb.entries()[0].source, "Admissions");
        assert_eq!(kb.entries()[1].question, "What programs does Kepler offer?");
        assert_eq!(kb.entries()[1].answer, "Project Management, Business Analytics");
    }

    #[test]
    fn test_category_filter_controls_order() {
        let kb = loader(&["Programs", "Admissions", "Orientation"])
            .parse(SAMPLE, Path::new("faq.json"))
            .unwrap();

        let sources: Vec<&str> = kb.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["Programs", "Admissions"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = loader(&[])
            .parse("{not json", Path::new("faq.json"))
            .unwrap_err();
        assert!(matches!(err, ChatbotError::KnowledgeBase { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faq.json");
        fs::write(&path, SAMPLE).unwrap();

        let loader = KnowledgeBaseLoader::new(KnowledgeBaseConfig {
            path,
            categories: vec![],
        });

        assert_eq!(loader.load().unwrap().len(), 2);
    }

    #[test]
    fn test_default_categories_exist_in_bundled_data() {
        let mut config = Config::default_config().knowledge_base;
        config.path = Path::new(env!("CARGO_MANIFEST_DIR")).join(&config.path);

        let kb = KnowledgeBaseLoader::new(config.clone()).load().unwrap();
        let loaded: Vec<String> = kb.category_counts().into_iter().map(|(s, _)| s).collect();

        assert_eq!(loaded, config.categories);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let loader = KnowledgeBaseLoader::new(KnowledgeBaseConfig {
            path: PathBuf::from("/nonexistent/faq.json"),
            categories: vec![],
        });

        assert!(loader.load().is_err());
        assert!(loader.load_or_empty().is_empty());
    }
}
