//! Positional inverted index.
//!
//! Maps every non-stopword term to the list of places it occurs, each place
//! given as (document, line, position).

pub mod builder;
pub mod inverted;
pub mod posting;

pub use builder::*;
pub use inverted::*;
pub use posting::*;
