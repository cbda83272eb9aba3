//! Corpus-derived stopwords.
//!
//! The selector ranks the merged frequency table and takes the top
//! `floor(W * rate / 100)` terms, where `W` is the number of distinct terms.
//! The resulting [`StopwordSet`] is immutable and is shared by reference
//! counting with every index worker.

pub mod selector;
pub mod set;

pub use selector::*;
pub use set::*;
