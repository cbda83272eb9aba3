//! Analyzers combine a tokenizer with a chain of filters.
//!
//! ```text
//! Raw line → Analyzer → Token Stream → Frequency counter / Index builder
//!              ↓
//!          Tokenizer
//!              ↓
//!          Filter 1 … Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`corpus::CorpusAnalyzer`] - Delimiter tokenizer + lowercase; the analyzer every stage shares
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains

use crate::analysis::token::TokenStream;

/// Trait for analyzers that turn a line of text into a token stream.
pub trait Analyzer: Send + Sync + std::fmt::Debug {
    /// Analyze the given text into a lazy stream of tokens.
    fn analyze<'a>(&'a self, text: &'a str) -> TokenStream<'a>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &str;
}

pub mod corpus;
pub mod pipeline;

pub use corpus::CorpusAnalyzer;
pub use pipeline::PipelineAnalyzer;
