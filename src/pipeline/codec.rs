//! Text formats of the stage artifacts.
//!
//! | artifact          | stage  | line format          | order            |
//! |-------------------|--------|----------------------|------------------|
//! | `frequencies.tsv` | count  | `term\tcount`        | by term          |
//! | `vocabulary-size` | count  | a single integer     |                  |
//! | `stopwords.tsv`   | select | `count\tterm`        | by rank          |
//! | `selection.json`  | select | [`SelectionSummary`] |                  |
//! | `index.tsv`       | index  | `term\tpostinglist`  | by term          |
//!
//! Readers skip lines that do not parse, logging each one.

use std::io::{Cursor, Write};

use log::warn;

use crate::error::{Result, StopdexError};
use crate::frequency::{FrequencyEntry, FrequencyTable};
use crate::index::InvertedIndex;
use crate::pipeline::artifacts::ArtifactWriter;
use crate::stopword::SelectionSummary;

pub const FREQUENCIES: &str = "frequencies.tsv";
pub const VOCABULARY_SIZE: &str = "vocabulary-size";
pub const STOPWORDS: &str = "stopwords.tsv";
pub const SELECTION: &str = "selection.json";
pub const INDEX: &str = "index.tsv";

/// Call `parse` on every non-empty line, skipping recoverable failures.
fn for_each_record<F>(data: &[u8], artifact: &str, mut parse: F) -> Result<()>
where
    F: FnMut(usize, &str) -> Result<()>,
{
    for (i, raw) in data.split(|&b| b == b'\n').enumerate() {
        if raw.is_empty() {
            continue;
        }
        let number = i + 1;
        let result = std::str::from_utf8(raw)
            .map_err(|_| StopdexError::malformed_record(artifact, number, "invalid UTF-8"))
            .and_then(|line| parse(number, line));
        match result {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => warn!("skipping record: {e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn parse_count(artifact: &str, number: usize, text: &str) -> Result<u64> {
    match text.parse::<u64>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(StopdexError::malformed_record(
            artifact,
            number,
            format!("invalid count {text:?}"),
        )),
    }
}

/// Write the full table sorted by term.
pub fn write_frequencies(writer: &mut ArtifactWriter<'_>, table: &FrequencyTable) -> Result<()> {
    for entry in table.sorted_entries() {
        writeln!(writer, "{}\t{}", entry.term, entry.count)?;
        writer.record();
    }
    Ok(())
}

pub fn read_frequencies(data: &[u8]) -> Result<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for_each_record(data, FREQUENCIES, |number, line| {
        let (term, count) = line.split_once('\t').ok_or_else(|| {
            StopdexError::malformed_record(FREQUENCIES, number, "missing tab")
        })?;
        if term.is_empty() {
            return Err(StopdexError::malformed_record(FREQUENCIES, number, "empty term"));
        }
        let count = parse_count(FREQUENCIES, number, count)?;
        if table.contains(term) {
            return Err(StopdexError::malformed_record(
                FREQUENCIES,
                number,
                format!("duplicate term {term:?}"),
            ));
        }
        table.add(term, count);
        Ok(())
    })?;
    Ok(table)
}

pub fn write_vocabulary_size(writer: &mut ArtifactWriter<'_>, size: usize) -> Result<()> {
    writeln!(writer, "{size}")?;
    writer.record();
    Ok(())
}

/// Read the vocabulary size. Unlike the line-oriented artifacts, a bad value
/// here cannot be skipped: without it no cutoff can be computed.
pub fn read_vocabulary_size(data: &[u8]) -> Result<usize> {
    let text = String::from_utf8_lossy(data);
    let text = text.trim();
    text.parse::<usize>().map_err(|_| {
        StopdexError::aggregation(
            "count",
            "vocabulary size artifact does not hold an integer",
            "a non-negative integer",
            format!("{text:?}"),
        )
    })
}

/// Write stopwords in rank order.
pub fn write_stopwords(writer: &mut ArtifactWriter<'_>, ranked: &[FrequencyEntry]) -> Result<()> {
    for entry in ranked {
        writeln!(writer, "{}\t{}", entry.count, entry.term)?;
        writer.record();
    }
    Ok(())
}

pub fn read_stopwords(data: &[u8]) -> Result<Vec<FrequencyEntry>> {
    let mut ranked = Vec::new();
    for_each_record(data, STOPWORDS, |number, line| {
        let (count, term) = line
            .split_once('\t')
            .ok_or_else(|| StopdexError::malformed_record(STOPWORDS, number, "missing tab"))?;
        if term.is_empty() {
            return Err(StopdexError::malformed_record(STOPWORDS, number, "empty term"));
        }
        let count = parse_count(STOPWORDS, number, count)?;
        ranked.push(FrequencyEntry::new(term, count));
        Ok(())
    })?;
    Ok(ranked)
}

pub fn write_selection(writer: &mut ArtifactWriter<'_>, summary: &SelectionSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)?;
    writer.record();
    Ok(())
}

pub fn read_selection(data: &[u8]) -> Result<SelectionSummary> {
    serde_json::from_slice(data)
        .map_err(|e| StopdexError::stage_io("select", format!("invalid {SELECTION}: {e}")))
}

/// Write one `term\tpostinglist` line per term, sorted by term.
pub fn write_index(writer: &mut ArtifactWriter<'_>, index: &InvertedIndex) -> Result<()> {
    for (term, list) in index.iter() {
        writeln!(writer, "{term}\t{list}")?;
        writer.record();
    }
    Ok(())
}

pub fn read_index(data: &[u8]) -> Result<InvertedIndex> {
    InvertedIndex::read_from(Cursor::new(data), INDEX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_frequencies_skips_malformed() {
        let data = b"cat\t1\nno-tab\nsat\tmany\nthe\t2\n\t4\nthe\t9\nzero\t0\n";
        let table = read_frequencies(data).unwrap();

        assert_eq!(table.vocabulary_size(), 2);
        assert_eq!(table.count("cat"), 1);
        assert_eq!(table.count("the"), 2);
    }

    #[test]
    fn test_read_vocabulary_size() {
        assert_eq!(read_vocabulary_size(b"42\n").unwrap(), 42);
        assert!(matches!(
            read_vocabulary_size(b"forty-two"),
            Err(StopdexError::Aggregation { .. })
        ));
        assert!(read_vocabulary_size(b"").is_err());
    }

    #[test]
    fn test_read_stopwords_keeps_rank_order() {
        let ranked = read_stopwords(b"9\tthe\n9\ta\n\xff\xfe\n3\tof\n").unwrap();
        let terms: Vec<&str> = ranked.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["the", "a", "of"]);
    }

    #[test]
    fn test_read_selection() {
        let summary =
            read_selection(br#"{"vocabulary_size": 4, "rate": 25, "cutoff": 1}"#).unwrap();
        assert_eq!(summary.cutoff, 1);
        assert_eq!(summary.source_checksum, None);

        let summary = read_selection(
            br#"{"vocabulary_size": 4, "rate": 25, "cutoff": 1, "source_checksum": 7}"#,
        )
        .unwrap();
        assert_eq!(summary.source_checksum, Some(7));
        assert!(read_selection(b"{").is_err());
    }
}
