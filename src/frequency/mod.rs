//! Corpus-wide term frequency counting.
//!
//! Workers count the documents they are handed into private tables, and the
//! tables are merged by summation once every worker has finished. Because the
//! merge is a plain sum, the order in which partial tables meet does not
//! matter. The vocabulary size is read off the fully merged table, never from
//! a partial one.

pub mod counter;
pub mod table;

pub use counter::*;
pub use table::*;
