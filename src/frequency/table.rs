//! Frequency table types.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A single (term, count) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// The term.
    pub term: String,

    /// Number of occurrences of the term across the corpus.
    pub count: u64,
}

impl FrequencyEntry {
    /// Create a new entry.
    pub fn new<S: Into<String>>(term: S, count: u64) -> Self {
        FrequencyEntry {
            term: term.into(),
            count,
        }
    }
}

/// A term → occurrence count table.
///
/// # Examples
///
/// ```
/// use stopdex::frequency::FrequencyTable;
///
/// let mut left = FrequencyTable::new();
/// left.add("the", 2);
/// let mut right = FrequencyTable::new();
/// right.add("the", 1);
/// right.add("cat", 1);
///
/// let merged = left.merge(right);
/// assert_eq!(merged.count("the"), 3);
/// assert_eq!(merged.vocabulary_size(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FrequencyTable::default()
    }

    /// Add `n` occurrences of a term.
    pub fn add(&mut self, term: &str, n: u64) {
        if let Some(count) = self.counts.get_mut(term) {
            *count += n;
        } else {
            self.counts.insert(term.to_string(), n);
        }
    }

    /// Add `n` occurrences of an owned term.
    pub fn add_owned(&mut self, term: String, n: u64) {
        *self.counts.entry(term).or_insert(0) += n;
    }

    /// Merge two tables by summing counts.
    ///
    /// The smaller table is folded into the larger one.
    pub fn merge(self, other: FrequencyTable) -> FrequencyTable {
        let (mut larger, smaller) = if self.counts.len() >= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (term, n) in smaller.counts {
            larger.add_owned(term, n);
        }
        larger
    }

    /// Occurrence count of a term (0 if absent).
    pub fn count(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Check whether a term has been seen.
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Check if the table has no terms.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of occurrences across all terms.
    pub fn total_occurrences(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over (term, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// All entries, sorted by term.
    pub fn sorted_entries(&self) -> Vec<FrequencyEntry> {
        let mut entries: Vec<FrequencyEntry> = self
            .counts
            .iter()
            .map(|(term, &count)| FrequencyEntry::new(term.as_str(), count))
            .collect();
        entries.sort_unstable_by(|a, b| a.term.cmp(&b.term));
        entries
    }
}

impl FromIterator<FrequencyEntry> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = FrequencyEntry>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for entry in iter {
            table.add_owned(entry.term, entry.count);
        }
        table
    }
}
