//! Parallel frequency counter.

use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, CorpusAnalyzer};
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::frequency::table::FrequencyTable;

/// Totals observed while counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of documents scanned.
    pub documents: u64,

    /// Number of lines scanned.
    pub lines: u64,

    /// Number of token occurrences.
    pub tokens: u64,
}

impl CorpusStats {
    fn merge(self, other: CorpusStats) -> CorpusStats {
        CorpusStats {
            documents: self.documents + other.documents,
            lines: self.lines + other.lines,
            tokens: self.tokens + other.tokens,
        }
    }
}

/// The finished output of the counting stage.
#[derive(Debug, Clone)]
pub struct FrequencyCount {
    /// The merged, corpus-wide table.
    pub table: FrequencyTable,

    /// Number of distinct terms, read from the merged table.
    pub vocabulary_size: usize,

    /// Scan totals.
    pub stats: CorpusStats,
}

/// A worker's private, partially counted table.
#[derive(Debug, Default)]
struct PartialCount {
    table: FrequencyTable,
    stats: CorpusStats,
}

impl PartialCount {
    fn add_document(&mut self, analyzer: &dyn Analyzer, document: &Document) {
        for line in &document.lines {
            for token in analyzer.analyze(line) {
                self.table.add_owned(token.text, 1);
                self.stats.tokens += 1;
            }
        }
        self.stats.lines += document.line_count() as u64;
        self.stats.documents += 1;
    }

    fn merge(self, other: PartialCount) -> PartialCount {
        PartialCount {
            table: self.table.merge(other.table),
            stats: self.stats.merge(other.stats),
        }
    }
}

/// Counts term occurrences across a corpus in parallel.
///
/// Runs on the current rayon pool; install a pool around [`count`](Self::count)
/// to control the degree of parallelism.
///
/// # Examples
///
/// ```
/// use stopdex::corpus::MemoryCorpus;
/// use stopdex::frequency::FrequencyCounter;
///
/// let corpus = MemoryCorpus::new()
///     .with_document("doc1", "the cat sat")
///     .with_document("doc2", "The dog sat");
///
/// let count = FrequencyCounter::new().count(&corpus).unwrap();
/// assert_eq!(count.table.count("the"), 2);
/// assert_eq!(count.vocabulary_size, 4);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyCounter {
    analyzer: Arc<dyn Analyzer>,
}

impl FrequencyCounter {
    /// Create a counter using the [`CorpusAnalyzer`].
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(CorpusAnalyzer::new()))
    }

    /// Create a counter using a specific analyzer.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        FrequencyCounter { analyzer }
    }

    /// The analyzer used to produce terms.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Count every term of every document.
    ///
    /// Any document that cannot be loaded aborts the count.
    pub fn count(&self, corpus: &dyn Corpus) -> Result<FrequencyCount> {
        let names = corpus.document_names()?;
        info!("counting terms in {} documents", names.len());

        let analyzer = self.analyzer.as_ref();
        let merged = names
            .par_iter()
            .try_fold(PartialCount::default, |mut partial, name| -> Result<PartialCount> {
                let document = corpus.load(name)?;
                partial.add_document(analyzer, &document);
                debug!("counted {} ({} lines)", name, document.line_count());
                Ok(partial)
            })
            .try_reduce(PartialCount::default, |a, b| Ok(a.merge(b)))?;

        let vocabulary_size = merged.table.vocabulary_size();
        info!(
            "counted {} tokens over {} lines: {} distinct terms",
            merged.stats.tokens, merged.stats.lines, vocabulary_size
        );

        Ok(FrequencyCount {
            table: merged.table,
            vocabulary_size,
            stats: merged.stats,
        })
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}
