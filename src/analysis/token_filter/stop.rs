//! Stop filter implementation.
//!
//! Unlike a dictionary-based stop filter, this one is driven by a
//! [`StopwordSet`] derived from the corpus itself. The set is shared as an
//! immutable snapshot, so any number of workers can hold the same filter.

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::stopword::StopwordSet;

/// A filter that removes stopwords from the token stream.
///
/// Removed tokens leave gaps in the position numbering: the survivors keep
/// the positions the tokenizer gave them.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use stopdex::analysis::token::{IntoTokenStream, Token};
/// use stopdex::analysis::token_filter::Filter;
/// use stopdex::analysis::token_filter::stop::StopFilter;
/// use stopdex::stopword::StopwordSet;
///
/// let stopwords = Arc::new(StopwordSet::from_terms(["the"]));
/// let filter = StopFilter::new(stopwords);
/// let tokens = vec![Token::new("the", 1), Token::new("cat", 2)];
///
/// let result: Vec<_> = filter.filter(tokens.into_token_stream()).collect();
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].text, "cat");
/// assert_eq!(result[0].position, 2);
/// ```
#[derive(Clone, Debug)]
pub struct StopFilter {
    stopwords: Arc<StopwordSet>,
}

impl StopFilter {
    /// Create a stop filter over a published stopword set.
    pub fn new(stopwords: Arc<StopwordSet>) -> Self {
        StopFilter { stopwords }
    }

    /// The stopword set this filter checks against.
    pub fn stopwords(&self) -> &Arc<StopwordSet> {
        &self.stopwords
    }
}

impl Filter for StopFilter {
    fn filter<'a>(&'a self, tokens: TokenStream<'a>) -> TokenStream<'a> {
        Box::new(tokens.filter(move |token| !self.stopwords.contains(&token.text)))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
