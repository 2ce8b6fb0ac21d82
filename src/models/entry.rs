// file: src/models/entry.rs
// description: reference question/answer entries and the knowledge base collection
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// One canonical question/answer pair, attributed to a source category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub question: String,
    pub answer: String,
    pub source: String,
}

impl ReferenceEntry {
    /// Builds an entry from raw field values.
    ///
    /// Returns `None` when the question or answer is missing or blank after
    /// trimming; such rows never reach the match engine.
    pub fn new(question: Option<&str>, answer: Option<&str>, source: &str) -> Option<Self> {
        let question = question.map(str::trim).filter(|q| !q.is_empty())?;
        let answer = answer.map(str::trim).filter(|a| !a.is_empty())?;

        Some(Self {
            question: question.to_string(),
            answer: answer.to_string(),
            source: source.trim().to_string(),
        })
    }
}

/// Ordered, read-only collection of reference entries.
///
/// Order is observable: the match engine resolves score ties in favour of
/// the entry that appears first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    entries: Vec<ReferenceEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<ReferenceEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry counts per source category, in first-seen order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for entry in &self.entries {
            match counts.iter_mut().find(|(source, _)| *source == entry.source) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.source.clone(), 1)),
            }
        }

        counts
    }
}

impl FromIterator<ReferenceEntry> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_trims_fields() {
        let entry = ReferenceEntry::new(
            Some("  What programs does Kepler offer? "),
            Some(" Project Management, Business Analytics\n"),
            "Programs",
        )
        .unwrap();

        assert_eq!(entry.question, "What programs does Kepler offer?");
        assert_eq!(entry.answer, "Project Management, Business Analytics");
        assert_eq!(entry.source, "Programs");
    }

    #[test]
    fn test_entry_rejects_missing_or_blank_fields() {
        assert!(ReferenceEntry::new(None, Some("answer"), "Programs").is_none());
        assert!(ReferenceEntry::new(Some("question"), None, "Programs").is_none());
        assert!(ReferenceEntry::new(Some("   "), Some("answer"), "Programs").is_none());
        assert!(ReferenceEntry::new(Some("question"), Some(""), "Programs").is_none());
    }

    #[test]
    fn test_category_counts_preserve_first_seen_order() {
        let kb: KnowledgeBase = [
            ("q1", "Programs"),
            ("q2", "Admissions"),
            ("q3", "Programs"),
        ]
        .into_iter()
        .filter_map(|(q, source)| ReferenceEntry::new(Some(q), Some("a"), source))
        .collect();

        assert_eq!(kb.len(), 3);
        assert_eq!(
            kb.category_counts(),
            vec![("Programs".to_string(), 2), ("Admissions".to_string(), 1)]
        );
    }

    #[test]
    fn test_empty_knowledge_base() {
        let kb = KnowledgeBase::empty();
        assert!(kb.is_empty());
        assert!(kb.category_counts().is_empty());
    }
}
