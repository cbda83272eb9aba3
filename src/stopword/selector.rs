//! Stopword selection by frequency rank.

use std::cmp::Ordering;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_STOPWORD_RATE;
use crate::error::{Result, StopdexError};
use crate::frequency::{FrequencyEntry, FrequencyTable};
use crate::stopword::set::StopwordSet;

/// Number of stopwords for a vocabulary of `vocabulary_size` distinct terms.
///
/// Computed as `floor(vocabulary_size * rate / 100)` in integer arithmetic.
///
/// ```
/// use stopdex::stopword::cutoff;
///
/// assert_eq!(cutoff(4, 25), 1);
/// assert_eq!(cutoff(99, 1), 0);
/// assert_eq!(cutoff(250, 1), 2);
/// assert_eq!(cutoff(7, 100), 7);
/// ```
pub fn cutoff(vocabulary_size: usize, rate: u32) -> usize {
    (vocabulary_size as u128 * rate as u128 / 100) as usize
}

/// Frequency rank order: count descending, then term ascending.
pub fn rank_order(a_term: &str, a_count: u64, b_term: &str, b_count: u64) -> Ordering {
    b_count.cmp(&a_count).then_with(|| a_term.cmp(b_term))
}

/// The outcome of a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSelection {
    /// The published stopword set.
    pub stopwords: StopwordSet,

    /// The selected entries in rank order, with their counts.
    pub ranked: Vec<FrequencyEntry>,

    /// Selection parameters and the vocabulary size they were applied to.
    pub summary: SelectionSummary,
}

/// The scalar side of a selection, persisted for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// Number of distinct terms in the corpus.
    pub vocabulary_size: usize,

    /// Stopword rate in percent.
    pub rate: u32,

    /// Number of stopwords selected.
    pub cutoff: usize,

    /// crc32 of the frequency artifact the selection was made from, when it
    /// came from a committed count stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_checksum: Option<u32>,
}

/// Selects the most frequent terms of a frequency table as stopwords.
///
/// # Examples
///
/// ```
/// use stopdex::frequency::{FrequencyEntry, FrequencyTable};
/// use stopdex::stopword::StopwordSelector;
///
/// let table: FrequencyTable = [("the", 2), ("sat", 2), ("cat", 1), ("dog", 1)]
///     .into_iter()
///     .map(|(t, c)| FrequencyEntry::new(t, c))
///     .collect();
///
/// let selection = StopwordSelector::new(25).unwrap().select(&table, 4).unwrap();
/// assert_eq!(selection.stopwords.terms(), &["sat".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopwordSelector {
    rate: u32,
}

impl StopwordSelector {
    /// Create a selector for a rate in percent (`0..=100`).
    pub fn new(rate: u32) -> Result<Self> {
        if rate > 100 {
            return Err(StopdexError::invalid_argument(format!(
                "stopword rate must be between 0 and 100, got {rate}"
            )));
        }
        Ok(StopwordSelector { rate })
    }

    /// The configured rate.
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Select stopwords from a complete table.
    ///
    /// `vocabulary_size` is the value finalized by the counting stage. It must
    /// equal the table's number of distinct terms; a disagreement means the
    /// table is not the complete, merged one and no cutoff is computed.
    pub fn select(
        &self,
        table: &FrequencyTable,
        vocabulary_size: usize,
    ) -> Result<StopwordSelection> {
        let observed = table.vocabulary_size();
        if observed != vocabulary_size {
            return Err(StopdexError::aggregation(
                "select",
                "vocabulary size does not match the frequency table",
                vocabulary_size,
                observed,
            ));
        }

        let cutoff = cutoff(vocabulary_size, self.rate);
        let ranked = Self::top_ranked(table, cutoff);
        debug_assert_eq!(ranked.len(), cutoff);

        info!(
            "selected {} stopwords from {} distinct terms at {}%",
            cutoff, vocabulary_size, self.rate
        );

        Ok(StopwordSelection {
            stopwords: StopwordSet::from_terms(ranked.iter().map(|e| e.term.as_str())),
            ranked,
            summary: SelectionSummary {
                vocabulary_size,
                rate: self.rate,
                cutoff,
                source_checksum: None,
            },
        })
    }

    /// The first `n` entries in rank order.
    fn top_ranked(table: &FrequencyTable, n: usize) -> Vec<FrequencyEntry> {
        if n == 0 {
            return Vec::new();
        }

        let order = |a: &(&str, u64), b: &(&str, u64)| rank_order(a.0, a.1, b.0, b.1);

        let mut entries: Vec<(&str, u64)> = table.iter().collect();
        // Terms are unique, so the order is total and the unstable
        // partition and sort below are deterministic.
        if n < entries.len() {
            entries.select_nth_unstable_by(n - 1, order);
            entries.truncate(n);
        }
        entries.par_sort_unstable_by(order);

        entries
            .into_iter()
            .map(|(term, count)| FrequencyEntry::new(term, count))
            .collect()
    }
}

impl Default for StopwordSelector {
    fn default() -> Self {
        StopwordSelector {
            rate: DEFAULT_STOPWORD_RATE,
        }
    }
}
