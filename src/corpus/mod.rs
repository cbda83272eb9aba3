//! Corpus access.
//!
//! A corpus is a collection of named documents, each an ordered sequence of
//! lines. Stages never hold the whole corpus in memory: they list document
//! names once and load each document inside the worker that processes it.

pub mod directory;
pub mod document;
pub mod memory;

pub use directory::*;
pub use document::*;
pub use memory::*;

use crate::error::Result;

/// A source of documents.
///
/// Implementations must return the same names and contents every time they
/// are asked, since the pipeline scans the corpus once per stage.
pub trait Corpus: Send + Sync + std::fmt::Debug {
    /// List document names, sorted and unique.
    fn document_names(&self) -> Result<Vec<String>>;

    /// Load one document by name.
    fn load(&self, name: &str) -> Result<Document>;
}
