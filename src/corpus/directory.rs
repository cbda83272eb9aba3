//! Directory-backed corpus.
//!
//! Every regular file directly inside the directory is a document named by
//! its file name. Files whose names start with `.` or `_` are treated as
//! hidden and skipped, so that a previous run's bookkeeping files never
//! become part of the corpus. Names containing a tab, a line break or `;`
//! cannot be written into a posting list and are skipped as well.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::corpus::{Corpus, Document};
use crate::error::{Result, StopdexError};

/// A corpus backed by the files of one directory.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    directory: PathBuf,
}

impl DirectoryCorpus {
    /// Open a directory as a corpus.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.is_dir() {
            return Err(StopdexError::input(format!(
                "Corpus path is not a readable directory: {}",
                directory.display()
            )));
        }

        Ok(DirectoryCorpus { directory })
    }

    /// The corpus directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn is_hidden(name: &str) -> bool {
        name.starts_with('.') || name.starts_with('_')
    }

    fn is_encodable(name: &str) -> bool {
        !name.contains(['\t', '\n', '\r', ';'])
    }
}

impl Corpus for DirectoryCorpus {
    fn document_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| {
            StopdexError::input(format!(
                "Failed to list {}: {e}",
                self.directory.display()
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                StopdexError::input(format!(
                    "Failed to list {}: {e}",
                    self.directory.display()
                ))
            })?;

            let file_type = entry
                .file_type()
                .map_err(|e| StopdexError::input(format!("{:?}: {e}", entry.path())))?;
            if !file_type.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!("skipping file {:?} (non-unicode file name)", entry.path());
                    continue;
                }
            };
            if Self::is_hidden(&name) {
                debug!("skipping hidden file {name}");
                continue;
            }
            if !Self::is_encodable(&name) {
                warn!("skipping file {name:?} (name cannot appear in a posting list)");
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Document> {
        let path = self.directory.join(name);
        let bytes = fs::read(&path).map_err(|e| {
            StopdexError::input(format!("Failed to read document {}: {e}", path.display()))
        })?;

        // Invalid UTF-8 sequences become U+FFFD rather than failing the run.
        let text = String::from_utf8_lossy(&bytes);
        Ok(Document::from_text(name, &text))
    }
}
