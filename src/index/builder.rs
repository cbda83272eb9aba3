//! Parallel index builder.

use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::analyzer::{Analyzer, CorpusAnalyzer};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::index::inverted::InvertedIndex;
use crate::index::posting::{Posting, PostingList};
use crate::stopword::StopwordSet;

/// Counters reported by a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Documents scanned.
    pub documents: u64,

    /// Tokens seen, stopwords included.
    pub tokens: u64,

    /// Tokens dropped as stopwords.
    pub suppressed: u64,
}

/// Per-worker state: its own stop filter over the shared set, and the
/// postings it has emitted so far.
struct PartialIndex {
    stop: StopFilter,
    lists: AHashMap<String, PostingList>,
    stats: BuildStats,
}

impl PartialIndex {
    fn new(stopwords: Arc<StopwordSet>) -> Self {
        PartialIndex {
            stop: StopFilter::new(stopwords),
            lists: AHashMap::new(),
            stats: BuildStats::default(),
        }
    }

    fn add_document(&mut self, analyzer: &dyn Analyzer, document: &Document) {
        let name: Arc<str> = Arc::from(document.name.as_str());
        for (line_number, line) in document.lines.iter().enumerate() {
            let mut seen = 0u64;
            let tokens = analyzer.analyze(line).inspect(|_| seen += 1);
            let mut kept = 0u64;
            for token in self.stop.filter(Box::new(tokens)) {
                kept += 1;
                self.lists
                    .entry(token.text)
                    .or_default()
                    .push(Posting::new(name.clone(), line_number, token.position));
            }
            self.stats.tokens += seen;
            self.stats.suppressed += seen - kept;
        }
        self.stats.documents += 1;
    }

    fn merge(mut self, mut other: PartialIndex) -> PartialIndex {
        if self.lists.len() < other.lists.len() {
            std::mem::swap(&mut self.lists, &mut other.lists);
        }
        for (term, mut list) in other.lists {
            self.lists.entry(term).or_default().append(&mut list);
        }
        self.stats.documents += other.stats.documents;
        self.stats.tokens += other.stats.tokens;
        self.stats.suppressed += other.stats.suppressed;
        self
    }
}

/// Builds a positional inverted index, leaving out stopwords.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use stopdex::corpus::MemoryCorpus;
/// use stopdex::index::IndexBuilder;
/// use stopdex::stopword::StopwordSet;
///
/// let corpus = MemoryCorpus::new()
///     .with_document("doc1", "the cat sat")
///     .with_document("doc2", "the dog sat");
/// let stopwords = Arc::new(StopwordSet::from_terms(["sat"]));
///
/// let (index, _) = IndexBuilder::new().build(&corpus, stopwords).unwrap();
/// assert_eq!(index.get("the").unwrap().to_string(), "doc1,0,1;doc2,0,1;");
/// assert!(index.get("sat").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    analyzer: Arc<dyn Analyzer>,
}

impl IndexBuilder {
    /// Create a builder using the [`CorpusAnalyzer`].
    pub fn new() -> Self {
        Self::with_analyzer(Arc::new(CorpusAnalyzer::new()))
    }

    /// Create a builder using a specific analyzer. It must be the analyzer
    /// the stopwords were counted with.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        IndexBuilder { analyzer }
    }

    /// Scan the corpus and build the index.
    pub fn build(
        &self,
        corpus: &dyn Corpus,
        stopwords: Arc<StopwordSet>,
    ) -> Result<(InvertedIndex, BuildStats)> {
        let names = corpus.document_names()?;
        info!(
            "indexing {} documents with {} stopwords",
            names.len(),
            stopwords.len()
        );

        let analyzer = self.analyzer.as_ref();
        let merged = names
            .par_iter()
            .try_fold(
                || PartialIndex::new(stopwords.clone()),
                |mut partial, name| -> Result<PartialIndex> {
                    let document = corpus.load(name)?;
                    partial.add_document(analyzer, &document);
                    debug!("indexed {} ({} lines)", name, document.line_count());
                    Ok(partial)
                },
            )
            .try_reduce(
                || PartialIndex::new(stopwords.clone()),
                |a, b| Ok(a.merge(b)),
            )?;

        let stats = merged.stats;
        let mut lists: Vec<(String, PostingList)> = merged.lists.into_iter().collect();
        lists.par_iter_mut().for_each(|(_, list)| list.sort());

        let mut index = InvertedIndex::new();
        for (term, list) in lists {
            index.insert(term, list);
        }

        info!(
            "indexed {} terms, {} postings, {} tokens suppressed",
            index.len(),
            index.total_postings(),
            stats.suppressed
        );
        Ok((index, stats))
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;

    fn scenario() -> MemoryCorpus {
        MemoryCorpus::new()
            .with_document("doc1", "the cat sat")
            .with_document("doc2", "the dog sat")
    }

    #[test]
    fn test_positions_survive_stopwords() {
        let stopwords = Arc::new(StopwordSet::from_terms(["sat"]));
        let (index, stats) = IndexBuilder::new().build(&scenario(), stopwords).unwrap();

        assert_eq!(index.get("cat").unwrap().to_string(), "doc1,0,2;");
        assert_eq!(index.get("dog").unwrap().to_string(), "doc2,0,2;");
        assert_eq!(index.get("the").unwrap().to_string(), "doc1,0,1;doc2,0,1;");
        assert!(index.get("sat").is_none());
        assert_eq!(index.len(), 3);
        assert_eq!(
            stats,
            BuildStats {
                documents: 2,
                tokens: 6,
                suppressed: 2,
            }
        );
    }

    #[test]
    fn test_leading_stopword_shifts_positions() {
        let corpus = MemoryCorpus::new().with_document("d", "A quick fox\n\nthe FOX, a fox");
        let stopwords = Arc::new(StopwordSet::from_terms(["a", "the"]));
        let (index, _) = IndexBuilder::new().build(&corpus, stopwords).unwrap();

        assert_eq!(index.get("quick").unwrap().to_string(), "d,0,2;");
        assert_eq!(index.get("fox").unwrap().to_string(), "d,0,3;d,2,2;d,2,4;");
    }

    #[test]
    fn test_all_stopword_document_is_not_an_error() {
        let corpus = MemoryCorpus::new()
            .with_document("noise", "the the the")
            .with_document("empty", "");
        let stopwords = Arc::new(StopwordSet::from_terms(["the"]));
        let (index, stats) = IndexBuilder::new().build(&corpus, stopwords).unwrap();

        assert!(index.is_empty());
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.suppressed, 3);
    }

    #[test]
    fn test_same_index_on_any_pool_size() {
        let mut corpus = MemoryCorpus::new();
        for i in 0..30 {
            corpus.add_document(format!("doc{i:02}"), format!("x{} y z\nz y{}", i % 4, i % 3));
        }
        let stopwords = Arc::new(StopwordSet::from_terms(["z"]));

        let single = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

        let (a, _) = single
            .install(|| IndexBuilder::new().build(&corpus, stopwords.clone()))
            .unwrap();
        let (b, _) = many
            .install(|| IndexBuilder::new().build(&corpus, stopwords.clone()))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.get("y").unwrap().len(), 30);
    }
}
