//! The published stopword set.

use ahash::AHashSet;

/// An immutable set of stopwords, remembering their rank order.
///
/// # Examples
///
/// ```
/// use stopdex::stopword::StopwordSet;
///
/// let set = StopwordSet::from_terms(["the", "of"]);
/// assert!(set.contains("the"));
/// assert!(!set.contains("cat"));
/// assert_eq!(set.terms(), &["the".to_string(), "of".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    ranked: Vec<String>,
    lookup: AHashSet<String>,
}

impl StopwordSet {
    /// An empty set.
    pub fn empty() -> Self {
        StopwordSet::default()
    }

    /// Build a set from terms in rank order. Repeated terms keep their first rank.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranked = Vec::new();
        let mut lookup = AHashSet::new();
        for term in terms {
            let term = term.into();
            if lookup.insert(term.clone()) {
                ranked.push(term);
            }
        }
        StopwordSet { ranked, lookup }
    }

    /// Check whether a term is a stopword.
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.lookup.contains(term)
    }

    /// Stopwords in rank order (most frequent first).
    pub fn terms(&self) -> &[String] {
        &self.ranked
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

impl PartialEq for StopwordSet {
    fn eq(&self, other: &Self) -> bool {
        self.ranked == other.ranked
    }
}

impl Eq for StopwordSet {}
