//! The staged pipeline.
//!
//! Three stages run in order, each fully committed before the next reads it:
//!
//! 1. `count`: term frequencies and the vocabulary size,
//! 2. `select`: the stopword set,
//! 3. `index`: the positional inverted index.
//!
//! Stage outputs live in a [`Storage`](crate::storage::Storage) and become
//! visible only when the stage manifest is written.

pub mod artifacts;
pub mod codec;
pub mod manifest;
pub mod metrics;
pub mod runner;

pub use artifacts::*;
pub use manifest::*;
pub use metrics::*;
pub use runner::*;
