//! Postings and posting lists.
//!
//! The text form of a posting is `document,line,position` and a posting list
//! is its postings, each followed by `;`:
//!
//! ```text
//! doc1,0,1;doc2,0,1;
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, StopdexError};

/// One occurrence of a term.
///
/// Ordering is by document name, then line, then position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Posting {
    /// Name of the document the occurrence is in.
    pub document: Arc<str>,

    /// Zero-based line number within the document.
    pub line: usize,

    /// One-based token position within the line.
    pub position: usize,
}

impl Posting {
    /// Create a new posting.
    pub fn new(document: Arc<str>, line: usize, position: usize) -> Self {
        Posting {
            document,
            line,
            position,
        }
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.document, self.line, self.position)
    }
}

impl FromStr for Posting {
    type Err = StopdexError;

    /// Parse `document,line,position`. The document name may itself contain
    /// commas, so the numbers are taken from the right.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.rsplitn(3, ',');
        let position = parts.next();
        let line = parts.next();
        let document = parts.next();

        match (document, line, position) {
            (Some(document), Some(line), Some(position)) if !document.is_empty() => {
                let line = line
                    .parse()
                    .map_err(|_| StopdexError::other(format!("Invalid line number in {s:?}")))?;
                let position = position
                    .parse()
                    .map_err(|_| StopdexError::other(format!("Invalid position in {s:?}")))?;
                Ok(Posting::new(Arc::from(document), line, position))
            }
            _ => Err(StopdexError::other(format!("Invalid posting {s:?}"))),
        }
    }
}

/// All postings of one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    /// Create an empty list.
    pub fn new() -> Self {
        PostingList::default()
    }

    /// Append a posting.
    pub fn push(&mut self, posting: Posting) {
        self.postings.push(posting);
    }

    /// Move all postings of another list into this one.
    pub fn append(&mut self, other: &mut PostingList) {
        self.postings.append(&mut other.postings);
    }

    /// Sort postings by (document, line, position).
    pub fn sort(&mut self) {
        self.postings.sort_unstable();
    }

    /// The postings, in their current order.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Iterate over the postings.
    pub fn iter(&self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl From<Vec<Posting>> for PostingList {
    fn from(postings: Vec<Posting>) -> Self {
        PostingList { postings }
    }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

impl fmt::Display for PostingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for posting in &self.postings {
            write!(f, "{posting};")?;
        }
        Ok(())
    }
}

impl FromStr for PostingList {
    type Err = StopdexError;

    fn from_str(s: &str) -> Result<Self> {
        s.split(';')
            .filter(|part| !part.is_empty())
            .map(Posting::from_str)
            .collect::<Result<Vec<_>>>()
            .map(PostingList::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(document: &str, line: usize, position: usize) -> Posting {
        Posting::new(Arc::from(document), line, position)
    }

    #[test]
    fn test_posting_display_and_parse() {
        let p = posting("doc1", 0, 2);
        assert_eq!(p.to_string(), "doc1,0,2");
        assert_eq!("doc1,0,2".parse::<Posting>().unwrap(), p);
    }

    #[test]
    fn test_document_name_with_commas() {
        let p: Posting = "a,b.txt,3,4".parse().unwrap();
        assert_eq!(&*p.document, "a,b.txt");
        assert_eq!(p.line, 3);
        assert_eq!(p.position, 4);
    }

    #[test]
    fn test_invalid_postings() {
        assert!("doc1,0".parse::<Posting>().is_err());
        assert!(",0,1".parse::<Posting>().is_err());
        assert!("doc1,x,1".parse::<Posting>().is_err());
        assert!("doc1,0,-1".parse::<Posting>().is_err());
    }

    #[test]
    fn test_list_sort_and_display() {
        let mut list = PostingList::from(vec![
            posting("doc2", 0, 1),
            posting("doc1", 1, 1),
            posting("doc1", 0, 3),
            posting("doc1", 0, 1),
        ]);
        list.sort();

        assert_eq!(list.to_string(), "doc1,0,1;doc1,0,3;doc1,1,1;doc2,0,1;");
        assert_eq!(list.to_string().parse::<PostingList>().unwrap(), list);
    }

    #[test]
    fn test_append() {
        let mut a = PostingList::from(vec![posting("d", 0, 1)]);
        let mut b = PostingList::from(vec![posting("d", 0, 2)]);
        a.append(&mut b);

        assert_eq!(a.len(), 2);
        assert!(b.is_empty());
    }
}
