//! # stopdex
//!
//! Builds a positional inverted index over a text corpus, leaving out the
//! corpus's own most frequent terms instead of a fixed stopword list.
//!
//! ## Stages
//!
//! - **count**: a parallel term-frequency table and the number of distinct
//!   terms `W`
//! - **select**: the top `floor(W * rate / 100)` terms by frequency become
//!   stopwords
//! - **index**: every remaining occurrence is recorded as
//!   `document,line,position`
//!
//! ```
//! use stopdex::config::PipelineConfig;
//! use stopdex::corpus::MemoryCorpus;
//! use stopdex::pipeline::{ArtifactStores, Pipeline, load_index};
//!
//! let corpus = MemoryCorpus::new()
//!     .with_document("doc1", "the cat sat")
//!     .with_document("doc2", "the dog sat");
//! let stores = ArtifactStores::in_memory();
//!
//! Pipeline::new(PipelineConfig::default().with_stopword_rate(25))
//!     .unwrap()
//!     .run(&corpus, &stores)
//!     .unwrap();
//!
//! let index = load_index(stores.output.clone()).unwrap();
//! assert_eq!(index.get("the").unwrap().to_string(), "doc1,0,1;doc2,0,1;");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod index;
pub mod pipeline;
pub mod stopword;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::analyzer::{Analyzer, CorpusAnalyzer};
    pub use crate::config::PipelineConfig;
    pub use crate::corpus::{Corpus, DirectoryCorpus, MemoryCorpus};
    pub use crate::error::{Result, StopdexError};
    pub use crate::frequency::{FrequencyCounter, FrequencyTable};
    pub use crate::index::{IndexBuilder, InvertedIndex, Posting, PostingList};
    pub use crate::pipeline::{ArtifactStores, Pipeline, PipelineReport};
    pub use crate::stopword::{StopwordSelector, StopwordSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
