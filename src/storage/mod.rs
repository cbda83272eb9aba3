//! Storage abstraction layer for stage artifacts.
//!
//! Each pipeline stage writes its artifacts through a [`Storage`] backend.
//! Backends only need flat names, whole-file writes and an atomic rename;
//! the pipeline builds its all-or-nothing stage commit on top of those.

pub mod file;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use file::*;
pub use memory::*;
pub use traits::*;
