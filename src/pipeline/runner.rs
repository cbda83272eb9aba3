//! Pipeline runner.

use std::path::Path;
use std::sync::Arc;

use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::analyzer::{Analyzer, CorpusAnalyzer};
use crate::config::PipelineConfig;
use crate::corpus::Corpus;
use crate::error::{Result, StopdexError};
use crate::frequency::{FrequencyCounter, FrequencyTable};
use crate::index::{IndexBuilder, InvertedIndex};
use crate::pipeline::artifacts::{StageReader, StageWriter};
use crate::pipeline::codec;
use crate::pipeline::metrics::{PipelineReport, StageReport, StageStatus, StageTimer};
use crate::stopword::{SelectionSummary, StopwordSelector, StopwordSet, cutoff};
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageConfig};

pub const COUNT_STAGE: &str = "count";
pub const SELECT_STAGE: &str = "select";
pub const INDEX_STAGE: &str = "index";

const COUNT_ARTIFACTS: &[&str] = &[codec::FREQUENCIES, codec::VOCABULARY_SIZE];
const SELECT_ARTIFACTS: &[&str] = &[codec::STOPWORDS, codec::SELECTION];
const INDEX_ARTIFACTS: &[&str] = &[codec::INDEX];

/// Where each stage keeps its artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStores {
    /// Frequency table and vocabulary size.
    pub count: Arc<dyn Storage>,

    /// Stopword set and selection summary.
    pub select: Arc<dyn Storage>,

    /// The final index.
    pub output: Arc<dyn Storage>,
}

impl ArtifactStores {
    /// Intermediate stages under `work_dir/count` and `work_dir/select`, the
    /// index directly in `output_dir`.
    pub fn on_disk<P: AsRef<Path>, Q: AsRef<Path>>(work_dir: P, output_dir: Q) -> Result<Self> {
        let work_dir = work_dir.as_ref();
        let open = |path: &Path| -> Result<Arc<dyn Storage>> {
            let storage = FileStorage::new(path, StorageConfig::default())?;
            Ok(Arc::new(storage))
        };

        Ok(ArtifactStores {
            count: open(&work_dir.join(COUNT_STAGE))?,
            select: open(&work_dir.join(SELECT_STAGE))?,
            output: open(output_dir.as_ref())?,
        })
    }

    /// Keep every stage in memory.
    pub fn in_memory() -> Self {
        ArtifactStores {
            count: Arc::new(MemoryStorage::new()),
            select: Arc::new(MemoryStorage::new()),
            output: Arc::new(MemoryStorage::new()),
        }
    }
}

/// Runs the count, select and index stages on a dedicated thread pool.
///
/// # Examples
///
/// ```
/// use stopdex::config::PipelineConfig;
/// use stopdex::corpus::MemoryCorpus;
/// use stopdex::pipeline::{ArtifactStores, Pipeline, load_index};
///
/// let corpus = MemoryCorpus::new()
///     .with_document("doc1", "the cat sat")
///     .with_document("doc2", "the dog sat");
/// let stores = ArtifactStores::in_memory();
///
/// let pipeline = Pipeline::new(PipelineConfig::default().with_stopword_rate(25)).unwrap();
/// let report = pipeline.run(&corpus, &stores).unwrap();
/// assert_eq!(report.stopwords, 1);
///
/// let index = load_index(stores.output.clone()).unwrap();
/// assert!(index.get("sat").is_none());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    analyzer: Arc<dyn Analyzer>,
    thread_pool: ThreadPool,
}

impl Pipeline {
    /// Create a pipeline. Fails if the configuration is out of range.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let threads = config.effective_threads();

        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("stopdex-worker-{i}"))
            .build()
            .map_err(|e| StopdexError::internal(format!("Failed to create thread pool: {e}")))?;

        Ok(Pipeline {
            config,
            analyzer: Arc::new(CorpusAnalyzer::new()),
            thread_pool,
        })
    }

    /// Use a different analyzer for both counting and indexing.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// The configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    /// Run all three stages in order.
    pub fn run(&self, corpus: &dyn Corpus, stores: &ArtifactStores) -> Result<PipelineReport> {
        let timer = StageTimer::start();
        info!(
            "starting pipeline: rate {}%, {} threads",
            self.config.stopword_rate,
            self.threads()
        );

        let count = self.run_count_stage(corpus, &stores.count)?;
        let (summary, select) = self.run_select_stage(&stores.count, &stores.select)?;
        let (outcome, index) = self.run_index_stage(corpus, &stores.select, &stores.output)?;

        let report = PipelineReport {
            stages: vec![count, select, index],
            documents: outcome.documents,
            vocabulary_size: summary.vocabulary_size,
            stopword_rate: summary.rate,
            stopwords: summary.cutoff,
            indexed_terms: outcome.terms,
            postings: outcome.postings,
            suppressed_tokens: outcome.suppressed,
            elapsed_ms: timer.stop().as_secs_f64() * 1000.0,
        };
        info!("pipeline finished in {:.1} ms", report.elapsed_ms);
        Ok(report)
    }

    /// Count term frequencies and commit the table and vocabulary size.
    pub fn run_count_stage(
        &self,
        corpus: &dyn Corpus,
        store: &Arc<dyn Storage>,
    ) -> Result<StageReport> {
        let timer = StageTimer::start();

        if self.config.resume && StageReader::is_committed(store.as_ref()) {
            let reader = StageReader::open(COUNT_STAGE, store.clone())?;
            let records = reader
                .manifest()
                .artifact(codec::FREQUENCIES)
                .map_or(0, |entry| entry.records);
            info!("reusing committed {COUNT_STAGE} stage ({records} terms)");
            return Ok(StageReport::new(
                COUNT_STAGE,
                StageStatus::Reused,
                timer.stop(),
                records,
            ));
        }

        let counter = FrequencyCounter::with_analyzer(self.analyzer.clone());
        let count = self.thread_pool.install(|| counter.count(corpus))?;

        let mut writer = StageWriter::begin(COUNT_STAGE, store.clone(), COUNT_ARTIFACTS)?;
        let records = writer
            .write_artifact(codec::FREQUENCIES, |w| codec::write_frequencies(w, &count.table))?
            .records;
        writer.write_artifact(codec::VOCABULARY_SIZE, |w| {
            codec::write_vocabulary_size(w, count.vocabulary_size)
        })?;
        writer.commit()?;

        let elapsed = timer.stop();
        info!("{COUNT_STAGE} stage done in {elapsed:?}");
        Ok(StageReport::new(
            COUNT_STAGE,
            StageStatus::Completed,
            elapsed,
            records,
        ))
    }

    /// Select stopwords from the committed count stage.
    pub fn run_select_stage(
        &self,
        count_store: &Arc<dyn Storage>,
        select_store: &Arc<dyn Storage>,
    ) -> Result<(SelectionSummary, StageReport)> {
        let timer = StageTimer::start();
        let count = StageReader::open(COUNT_STAGE, count_store.clone())?;
        let source_checksum = count
            .manifest()
            .artifact(codec::FREQUENCIES)
            .map(|entry| entry.checksum);

        if self.config.resume && StageReader::is_committed(select_store.as_ref()) {
            let vocabulary_size = read_vocabulary_size(&count)?;
            let summary = codec::read_selection(
                &StageReader::open(SELECT_STAGE, select_store.clone())?
                    .read_artifact(codec::SELECTION)?,
            )?;

            if summary.rate == self.config.stopword_rate
                && summary.vocabulary_size == vocabulary_size
                && summary.source_checksum.is_some()
                && summary.source_checksum == source_checksum
            {
                info!(
                    "reusing committed {SELECT_STAGE} stage ({} stopwords)",
                    summary.cutoff
                );
                return Ok((
                    summary,
                    StageReport::new(
                        SELECT_STAGE,
                        StageStatus::Reused,
                        timer.stop(),
                        summary.cutoff as u64,
                    ),
                ));
            }
            info!("committed {SELECT_STAGE} stage is stale, selecting again");
        }

        let (table, vocabulary_size) = read_count_stage(&count)?;
        let selector = StopwordSelector::new(self.config.stopword_rate)?;
        let mut selection = self
            .thread_pool
            .install(|| selector.select(&table, vocabulary_size))?;
        selection.summary.source_checksum = source_checksum;

        let mut writer =
            StageWriter::begin(SELECT_STAGE, select_store.clone(), SELECT_ARTIFACTS)?;
        let records = writer
            .write_artifact(codec::STOPWORDS, |w| {
                codec::write_stopwords(w, &selection.ranked)
            })?
            .records;
        writer.write_artifact(codec::SELECTION, |w| {
            codec::write_selection(w, &selection.summary)
        })?;
        writer.commit()?;

        let elapsed = timer.stop();
        info!("{SELECT_STAGE} stage done in {elapsed:?}");
        Ok((
            selection.summary,
            StageReport::new(SELECT_STAGE, StageStatus::Completed, elapsed, records),
        ))
    }

    /// Build the index from the corpus and the committed stopword set.
    pub fn run_index_stage(
        &self,
        corpus: &dyn Corpus,
        select_store: &Arc<dyn Storage>,
        output_store: &Arc<dyn Storage>,
    ) -> Result<(IndexOutcome, StageReport)> {
        let timer = StageTimer::start();

        let (stopwords, _) = load_stopwords(select_store.clone())?;
        let stopwords = Arc::new(stopwords);

        let builder = IndexBuilder::with_analyzer(self.analyzer.clone());
        let (index, stats) = self
            .thread_pool
            .install(|| builder.build(corpus, stopwords))?;

        let mut writer =
            StageWriter::begin(INDEX_STAGE, output_store.clone(), INDEX_ARTIFACTS)?;
        let records = writer
            .write_artifact(codec::INDEX, |w| codec::write_index(w, &index))?
            .records;
        writer.commit()?;

        let outcome = IndexOutcome {
            documents: stats.documents,
            terms: index.len(),
            postings: index.total_postings(),
            suppressed: stats.suppressed,
        };

        let elapsed = timer.stop();
        info!("{INDEX_STAGE} stage done in {elapsed:?}");
        Ok((
            outcome,
            StageReport::new(INDEX_STAGE, StageStatus::Completed, elapsed, records),
        ))
    }
}

/// Totals of an index stage run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOutcome {
    pub documents: u64,
    pub terms: usize,
    pub postings: usize,
    pub suppressed: u64,
}

fn read_vocabulary_size(reader: &StageReader) -> Result<usize> {
    if reader.manifest().artifact(codec::VOCABULARY_SIZE).is_none() {
        return Err(StopdexError::aggregation(
            COUNT_STAGE,
            "vocabulary size was never finalized",
            codec::VOCABULARY_SIZE,
            "no such artifact",
        ));
    }
    codec::read_vocabulary_size(&reader.read_artifact(codec::VOCABULARY_SIZE)?)
}

/// Read the committed frequency table and vocabulary size.
pub fn load_frequencies(store: Arc<dyn Storage>) -> Result<(FrequencyTable, usize)> {
    read_count_stage(&StageReader::open(COUNT_STAGE, store)?)
}

fn read_count_stage(reader: &StageReader) -> Result<(FrequencyTable, usize)> {
    let vocabulary_size = read_vocabulary_size(reader)?;
    let table = codec::read_frequencies(&reader.read_artifact(codec::FREQUENCIES)?)?;
    Ok((table, vocabulary_size))
}

/// Read the committed stopword set and the summary it was selected with.
///
/// The number of stopwords must match the cutoff recorded for the
/// selection, and that cutoff must follow from the recorded rate and
/// vocabulary size.
pub fn load_stopwords(store: Arc<dyn Storage>) -> Result<(StopwordSet, SelectionSummary)> {
    let reader = StageReader::open(SELECT_STAGE, store)?;
    let summary = codec::read_selection(&reader.read_artifact(codec::SELECTION)?)?;
    let ranked = codec::read_stopwords(&reader.read_artifact(codec::STOPWORDS)?)?;

    let expected = cutoff(summary.vocabulary_size, summary.rate);
    if summary.cutoff != expected {
        return Err(StopdexError::aggregation(
            SELECT_STAGE,
            "recorded cutoff does not follow from vocabulary size and rate",
            expected,
            summary.cutoff,
        ));
    }
    if ranked.len() != summary.cutoff {
        return Err(StopdexError::aggregation(
            SELECT_STAGE,
            "stopword count does not match the cutoff",
            summary.cutoff,
            ranked.len(),
        ));
    }

    let stopwords = StopwordSet::from_terms(ranked.into_iter().map(|entry| entry.term));
    Ok((stopwords, summary))
}

/// Read the committed index.
pub fn load_index(store: Arc<dyn Storage>) -> Result<InvertedIndex> {
    let reader = StageReader::open(INDEX_STAGE, store)?;
    codec::read_index(&reader.read_artifact(codec::INDEX)?)
}
