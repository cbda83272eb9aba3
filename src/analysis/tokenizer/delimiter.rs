//! Delimiter-based tokenizer implementation.
//!
//! Splits text on a set of single-byte ASCII delimiters. Runs of consecutive
//! delimiters never produce empty tokens, and everything that is not a
//! delimiter (including non-ASCII text) is part of a token.

use std::fmt;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{Result, StopdexError};

/// The delimiter set used for corpus text.
pub const DEFAULT_DELIMITERS: &str = " !,.?:;'()*\t\n\"[]-/<>&#";

/// A tokenizer that splits text on a fixed set of ASCII delimiters.
#[derive(Clone)]
pub struct DelimiterTokenizer {
    /// Lookup table indexed by ASCII byte value.
    table: [bool; 128],
}

impl DelimiterTokenizer {
    /// Create a tokenizer using [`DEFAULT_DELIMITERS`].
    pub fn new() -> Self {
        let mut table = [false; 128];
        for b in DEFAULT_DELIMITERS.bytes() {
            table[b as usize] = true;
        }
        DelimiterTokenizer { table }
    }

    /// Create a tokenizer with a custom delimiter set.
    ///
    /// Every delimiter must be an ASCII character.
    pub fn with_delimiters(delimiters: &str) -> Result<Self> {
        let mut table = [false; 128];
        for c in delimiters.chars() {
            if !c.is_ascii() {
                return Err(StopdexError::analysis(format!(
                    "Delimiter {c:?} is not an ASCII character"
                )));
            }
            table[c as usize] = true;
        }
        Ok(DelimiterTokenizer { table })
    }

    /// Check whether a byte is one of this tokenizer's delimiters.
    #[inline]
    pub fn is_delimiter(&self, b: u8) -> bool {
        b < 0x80 && self.table[b as usize]
    }

    /// The delimiter set as a string, in byte order.
    pub fn delimiters(&self) -> String {
        (0u8..128)
            .filter(|&b| self.table[b as usize])
            .map(char::from)
            .collect()
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DelimiterTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelimiterTokenizer")
            .field("delimiters", &self.delimiters())
            .finish()
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> TokenStream<'a> {
        Box::new(DelimitedTokens {
            tokenizer: self,
            text,
            cursor: 0,
            position: 0,
        })
    }

    fn name(&self) -> &'static str {
        "delimiter"
    }
}

/// Lazy iterator over the tokens of one piece of text.
struct DelimitedTokens<'a> {
    tokenizer: &'a DelimiterTokenizer,
    text: &'a str,
    cursor: usize,
    position: usize,
}

impl Iterator for DelimitedTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let bytes = self.text.as_bytes();
        let stop = bytes.len();

        let mut i = self.cursor;
        while i < stop && self.tokenizer.is_delimiter(bytes[i]) {
            i += 1;
        }
        if i == stop {
            self.cursor = stop;
            return None;
        }

        // Delimiters are ASCII, so `i` and `j` always fall on char boundaries.
        let mut j = i + 1;
        while j < stop && !self.tokenizer.is_delimiter(bytes[j]) {
            j += 1;
        }
        self.cursor = j;
        self.position += 1;

        Some(Token::with_offsets(&self.text[i..j], self.position, i, j))
    }
}
