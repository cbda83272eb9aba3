//! Lowercase filter implementation.
//!
//! # Examples
//!
//! ```
//! use stopdex::analysis::token::{IntoTokenStream, Token};
//! use stopdex::analysis::token_filter::Filter;
//! use stopdex::analysis::token_filter::lowercase::LowercaseFilter;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 1), Token::new("WORLD", 2)];
//! let filtered: Vec<_> = filter.filter(tokens.into_token_stream()).collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// A filter that converts tokens to lowercase.
///
/// ASCII-only tokens take a fast path; anything else goes through the full
/// Unicode mapping of [`str::to_lowercase`]. Positions and offsets are kept.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        Box::new(tokens.map(|mut token| {
            if token.text.is_ascii() {
                token.text.make_ascii_lowercase();
            } else {
                token.text = token.text.to_lowercase();
            }
            token
        }))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
