//! Token types for text analysis.
//!
//! A [`Token`] is one unit of text produced by a tokenizer, together with its
//! position inside the line it came from. Positions are 1-based and are
//! assigned before any filtering, so a filter that removes tokens leaves gaps
//! in the numbering rather than shifting the survivors.
//!
//! # Examples
//!
//! ```
//! use stopdex::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 2, 6, 11);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.position, 2);
//! assert_eq!(token.start_offset, 6);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The 1-based position of the token within its line
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clone this token with updated text, keeping position and offsets.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A lazy stream of tokens borrowed from the text being analyzed.
///
/// Streams are single-pass; analyzing the same text again yields a fresh,
/// identical stream.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// Extension trait for turning collections of tokens into streams.
pub trait IntoTokenStream<'a> {
    /// Convert into a boxed token stream.
    fn into_token_stream(self) -> TokenStream<'a>;
}

impl<'a> IntoTokenStream<'a> for Vec<Token> {
    fn into_token_stream(self) -> TokenStream<'a> {
        Box::new(self.into_iter())
    }
}
