//! The finished inverted index.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use log::warn;

use crate::error::{Result, StopdexError};
use crate::index::posting::PostingList;

/// Term to posting list map, ordered by term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    lists: BTreeMap<String, PostingList>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Insert or replace the posting list of a term.
    pub fn insert(&mut self, term: String, list: PostingList) {
        self.lists.insert(term, list);
    }

    /// The posting list of a term, if the term is indexed.
    pub fn get(&self, term: &str) -> Option<&PostingList> {
        self.lists.get(term)
    }

    /// Check if a term is indexed.
    pub fn contains(&self, term: &str) -> bool {
        self.lists.contains_key(term)
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if the index has no terms.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Indexed terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// (term, list) pairs in ascending term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.lists.iter().map(|(term, list)| (term.as_str(), list))
    }

    /// Total number of postings across all terms.
    pub fn total_postings(&self) -> usize {
        self.lists.values().map(PostingList::len).sum()
    }

    /// Write one `term\tpostinglist` line per term.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (term, list) in &self.lists {
            writeln!(writer, "{term}\t{list}")?;
        }
        Ok(())
    }

    /// Read an index written by [`write_to`](Self::write_to).
    ///
    /// Lines that do not parse are logged and skipped.
    pub fn read_from<R: BufRead>(reader: R, artifact: &str) -> Result<Self> {
        let mut index = InvertedIndex::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match parse_line(&line, artifact, number + 1) {
                Ok((term, list)) => index.insert(term, list),
                Err(e) if e.is_recoverable() => warn!("skipping record: {e}"),
                Err(e) => return Err(e),
            }
        }
        Ok(index)
    }
}

fn parse_line(line: &str, artifact: &str, number: usize) -> Result<(String, PostingList)> {
    let (term, postings) = line
        .split_once('\t')
        .ok_or_else(|| StopdexError::malformed_record(artifact, number, "missing tab"))?;
    if term.is_empty() {
        return Err(StopdexError::malformed_record(artifact, number, "empty term"));
    }
    let list = postings
        .parse::<PostingList>()
        .map_err(|e| StopdexError::malformed_record(artifact, number, e.to_string()))?;
    Ok((term.to_string(), list))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use crate::index::posting::Posting;

    fn list(postings: &[(&str, usize, usize)]) -> PostingList {
        postings
            .iter()
            .map(|&(d, l, p)| Posting::new(Arc::from(d), l, p))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_write_sorted_by_term() {
        let mut index = InvertedIndex::new();
        index.insert("dog".to_string(), list(&[("doc2", 0, 2)]));
        index.insert("cat".to_string(), list(&[("doc1", 0, 2)]));

        let mut out = Vec::new();
        index.write_to(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cat\tdoc1,0,2;\ndog\tdoc2,0,2;\n"
        );
        assert_eq!(index.total_postings(), 2);
        assert_eq!(index.terms().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_read_skips_malformed_lines() {
        let text = "cat\tdoc1,0,2;\nbroken line\ndog\tdoc2,zero,2;\nthe\tdoc1,0,1;doc2,0,1;\n";
        let index = InvertedIndex::read_from(Cursor::new(text), "index.tsv").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("the").unwrap().len(), 2);
        assert!(!index.contains("dog"));
    }
}
