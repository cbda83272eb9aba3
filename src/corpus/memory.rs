//! In-memory corpus for tests and embedding.

use std::collections::BTreeMap;

use crate::corpus::{Corpus, Document};
use crate::error::{Result, StopdexError};

/// A corpus held entirely in memory.
///
/// # Examples
///
/// ```
/// use stopdex::corpus::{Corpus, MemoryCorpus};
///
/// let corpus = MemoryCorpus::new()
///     .with_document("doc2", "the dog sat")
///     .with_document("doc1", "the cat sat");
///
/// assert_eq!(corpus.document_names().unwrap(), vec!["doc1", "doc2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    documents: BTreeMap<String, String>,
}

impl MemoryCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        MemoryCorpus::default()
    }

    /// Add a document, replacing any existing one with the same name.
    pub fn with_document<S: Into<String>, T: Into<String>>(mut self, name: S, text: T) -> Self {
        self.add_document(name, text);
        self
    }

    /// Add a document, replacing any existing one with the same name.
    pub fn add_document<S: Into<String>, T: Into<String>>(&mut self, name: S, text: T) {
        self.documents.insert(name.into(), text.into());
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Corpus for MemoryCorpus {
    fn document_names(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn load(&self, name: &str) -> Result<Document> {
        self.documents
            .get(name)
            .map(|text| Document::from_text(name, text))
            .ok_or_else(|| StopdexError::input(format!("Document not found: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_document() {
        let corpus = MemoryCorpus::new().with_document("a", "line one\nline two");
        let doc = corpus.load("a").unwrap();
        assert_eq!(doc.lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_missing_document_is_input_error() {
        let corpus = MemoryCorpus::new();
        match corpus.load("nope") {
            Err(StopdexError::Input(msg)) => assert!(msg.contains("nope")),
            other => panic!("Expected input error, got {other:?}"),
        }
    }
}
