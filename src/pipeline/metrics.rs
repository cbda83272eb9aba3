//! Timing and counters for pipeline runs.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// A simple timer for measuring stage durations.
pub struct StageTimer {
    start: Instant,
}

impl StageTimer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

/// How a stage's output came to exist in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// The stage ran and committed new artifacts.
    Completed,
    /// A committed result from an earlier run was reused.
    Reused,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            StageStatus::Completed => "completed",
            StageStatus::Reused => "reused",
        })
    }
}

/// Report for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage name.
    pub stage: String,

    /// Whether the stage ran or was reused.
    pub status: StageStatus,

    /// Wall-clock time spent in the stage, in milliseconds.
    pub elapsed_ms: f64,

    /// Records in the stage's primary artifact.
    pub records: u64,
}

impl StageReport {
    pub fn new<S: Into<String>>(
        stage: S,
        status: StageStatus,
        elapsed: Duration,
        records: u64,
    ) -> Self {
        StageReport {
            stage: stage.into(),
            status,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            records,
        }
    }
}

/// Summary of a whole pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Per-stage reports, in execution order.
    pub stages: Vec<StageReport>,

    /// Number of documents indexed.
    pub documents: u64,

    /// Number of distinct terms in the corpus.
    pub vocabulary_size: usize,

    /// Stopword rate in percent.
    pub stopword_rate: u32,

    /// Number of stopwords selected.
    pub stopwords: usize,

    /// Number of terms in the index.
    pub indexed_terms: usize,

    /// Number of postings in the index.
    pub postings: usize,

    /// Occurrences dropped as stopwords.
    pub suppressed_tokens: u64,

    /// Total wall-clock time, in milliseconds.
    pub elapsed_ms: f64,
}

impl PipelineReport {
    /// The report of a stage, if it ran.
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == name)
    }
}
