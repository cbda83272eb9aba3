//! Stage manifests.
//!
//! A manifest lists every artifact of a committed stage together with its
//! checksum. It is written last, so its presence marks the stage committed.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StopdexError};
use crate::storage::Storage;

/// File name of the manifest inside a stage's storage.
pub const MANIFEST_FILE: &str = "_MANIFEST.json";

/// Suffix of artifacts that are written but not yet committed.
pub const TEMP_SUFFIX: &str = ".tmp";

/// One committed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// File name inside the stage storage.
    pub name: String,

    /// CRC32 of the artifact's bytes.
    pub checksum: u32,

    /// Number of records (lines) written.
    pub records: u64,

    /// Size in bytes.
    pub bytes: u64,
}

/// The manifest of a committed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageManifest {
    /// Stage name.
    pub stage: String,

    /// When the stage was committed.
    pub committed_at: DateTime<Utc>,

    /// Committed artifacts.
    pub artifacts: Vec<ArtifactEntry>,
}

impl StageManifest {
    /// Look up an artifact by name.
    pub fn artifact(&self, name: &str) -> Option<&ArtifactEntry> {
        self.artifacts.iter().find(|entry| entry.name == name)
    }

    /// Whether a storage holds a manifest.
    pub fn exists(storage: &dyn Storage) -> bool {
        storage.file_exists(MANIFEST_FILE)
    }

    /// Read the manifest of a stage.
    pub fn load(stage: &str, storage: &dyn Storage) -> Result<Self> {
        if !Self::exists(storage) {
            return Err(StopdexError::stage_io(stage, "stage has not been committed"));
        }
        let mut input = storage.open_input(MANIFEST_FILE)?;
        let mut content = String::new();
        input
            .read_to_string(&mut content)
            .map_err(|e| StopdexError::stage_io(stage, format!("cannot read manifest: {e}")))?;

        let manifest: StageManifest = serde_json::from_str(&content)
            .map_err(|e| StopdexError::stage_io(stage, format!("invalid manifest: {e}")))?;
        if manifest.stage != stage {
            return Err(StopdexError::stage_io(
                stage,
                format!("manifest belongs to stage {}", manifest.stage),
            ));
        }
        Ok(manifest)
    }

    /// Write the manifest through a temporary file and rename it into place.
    pub fn store(&self, storage: &dyn Storage) -> Result<()> {
        let temp = format!("{MANIFEST_FILE}{TEMP_SUFFIX}");
        let json = serde_json::to_vec_pretty(self)?;

        let mut output = storage.create_output(&temp)?;
        output.write_all(&json)?;
        output.close()?;
        storage.rename_file(&temp, MANIFEST_FILE)?;
        storage.sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn manifest(stage: &str) -> StageManifest {
        StageManifest {
            stage: stage.to_string(),
            committed_at: Utc::now(),
            artifacts: vec![ArtifactEntry {
                name: "frequencies.tsv".to_string(),
                checksum: 42,
                records: 3,
                bytes: 20,
            }],
        }
    }

    #[test]
    fn test_store_and_load() {
        let storage = MemoryStorage::new();
        assert!(!StageManifest::exists(&storage));

        let written = manifest("count");
        written.store(&storage).unwrap();

        let read = StageManifest::load("count", &storage).unwrap();
        assert_eq!(read, written);
        assert_eq!(read.artifact("frequencies.tsv").unwrap().records, 3);
        assert!(read.artifact("missing").is_none());
        assert!(!storage.file_exists("_MANIFEST.json.tmp"));
    }

    #[test]
    fn test_missing_manifest() {
        let storage = MemoryStorage::new();
        let err = StageManifest::load("count", &storage).unwrap_err();
        assert!(matches!(err, StopdexError::StageIo { .. }));
    }

    #[test]
    fn test_wrong_stage() {
        let storage = MemoryStorage::new();
        manifest("count").store(&storage).unwrap();

        assert!(StageManifest::load("select", &storage).is_err());
    }
}
