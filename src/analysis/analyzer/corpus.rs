//! The analyzer shared by every stage of the pipeline.
//!
//! # Pipeline
//!
//! 1. DelimiterTokenizer (fixed punctuation/whitespace set)
//! 2. LowercaseFilter
//!
//! # Examples
//!
//! ```
//! use stopdex::analysis::analyzer::{Analyzer, CorpusAnalyzer};
//!
//! let analyzer = CorpusAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("The Cat (sat)!").collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "the");
//! assert_eq!(tokens[2].text, "sat");
//! assert_eq!(tokens[2].position, 3);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::delimiter::DelimiterTokenizer;

/// Delimiter tokenization followed by lowercasing.
#[derive(Clone, Debug)]
pub struct CorpusAnalyzer {
    inner: PipelineAnalyzer,
}

impl CorpusAnalyzer {
    /// Create a corpus analyzer with the default delimiter set.
    pub fn new() -> Self {
        Self::with_tokenizer(DelimiterTokenizer::new())
    }

    /// Create a corpus analyzer around a specific delimiter tokenizer.
    pub fn with_tokenizer(tokenizer: DelimiterTokenizer) -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(tokenizer))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("corpus");
        CorpusAnalyzer { inner }
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// Collect the terms of a line, in order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).map(|token| token.text).collect()
    }
}

impl Default for CorpusAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for CorpusAnalyzer {
    fn analyze<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_analyzer() {
        let analyzer = CorpusAnalyzer::new();
        assert_eq!(
            analyzer.terms("\"Hello,\" said the CAT; [the] <end>"),
            vec!["hello", "said", "the", "cat", "the", "end"]
        );
        assert_eq!(analyzer.name(), "corpus");
    }

    #[test]
    fn test_case_variants_share_a_term() {
        let analyzer = CorpusAnalyzer::new();
        assert_eq!(analyzer.terms("Sat SAT sat"), vec!["sat", "sat", "sat"]);
    }

    #[test]
    fn test_empty_line() {
        let analyzer = CorpusAnalyzer::new();
        assert_eq!(analyzer.analyze("").count(), 0);
    }
}
