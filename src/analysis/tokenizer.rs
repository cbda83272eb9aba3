//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline: they split a line
//! of raw text into tokens and number them. Case normalization is left to
//! filters.
//!
//! # Available Tokenizers
//!
//! - [`delimiter::DelimiterTokenizer`] - Splits on a fixed set of ASCII delimiters
//!
//! # Examples
//!
//! ```
//! use stopdex::analysis::tokenizer::Tokenizer;
//! use stopdex::analysis::tokenizer::delimiter::DelimiterTokenizer;
//!
//! let tokenizer = DelimiterTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].position, 2);
//! ```

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert text into tokens.
///
/// Implementations must be pure: tokenizing the same text twice yields the
/// same tokens. The trait requires `Send + Sync` so a single tokenizer can be
/// shared by every worker of a stage.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a lazy stream of tokens.
    ///
    /// Token positions start at 1.
    fn tokenize<'a>(&'a self, text: &'a str) -> TokenStream<'a>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod delimiter;
