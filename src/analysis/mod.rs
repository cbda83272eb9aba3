//! Text analysis module for stopdex.
//!
//! This module turns raw lines into streams of normalized tokens. The same
//! analyzer must be used by every stage that looks at corpus text, so that a
//! term counted during frequency analysis is spelled exactly the same when the
//! index builder checks it against the stopword set.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
