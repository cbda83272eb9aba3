//! All-or-nothing stage commit on top of a [`Storage`].
//!
//! A [`StageWriter`] writes every artifact under a temporary name, then on
//! [`commit`](StageWriter::commit) renames them into place and writes the
//! stage manifest. A [`StageReader`] only reads what a manifest lists and
//! verifies each artifact's checksum before handing it out.

use std::io::{self, Read, Write};
use std::sync::Arc;

use chrono::Utc;
use crc32fast::Hasher;
use log::{debug, info};

use crate::error::{Result, StopdexError};
use crate::pipeline::manifest::{ArtifactEntry, MANIFEST_FILE, StageManifest, TEMP_SUFFIX};
use crate::storage::Storage;

/// A writer that checksums and counts everything passing through it.
pub struct ArtifactWriter<'a> {
    inner: &'a mut dyn Write,
    hasher: Hasher,
    bytes: u64,
    records: u64,
}

impl<'a> ArtifactWriter<'a> {
    fn new(inner: &'a mut dyn Write) -> Self {
        ArtifactWriter {
            inner,
            hasher: Hasher::new(),
            bytes: 0,
            records: 0,
        }
    }

    /// Count one record. Codecs call this once per line they write.
    pub fn record(&mut self) {
        self.records += 1;
    }
}

impl Write for ArtifactWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writes the artifacts of one stage and commits them together.
#[derive(Debug)]
pub struct StageWriter {
    stage: String,
    storage: Arc<dyn Storage>,
    artifacts: Vec<String>,
    staged: Vec<ArtifactEntry>,
}

impl StageWriter {
    /// Start writing a stage that produces the named artifacts.
    ///
    /// Any previous commit of the stage is withdrawn first, so a run that
    /// fails halfway never leaves a manifest describing stale artifacts.
    /// Only temporary files this stage could have written are cleared; other
    /// files in the storage are left alone.
    pub fn begin<S: Into<String>>(
        stage: S,
        storage: Arc<dyn Storage>,
        artifacts: &[&str],
    ) -> Result<Self> {
        let stage = stage.into();
        storage
            .delete_file(MANIFEST_FILE)
            .map_err(|e| StopdexError::stage_io(&stage, e.to_string()))?;

        let leftovers = artifacts
            .iter()
            .copied()
            .chain(std::iter::once(MANIFEST_FILE))
            .map(|name| format!("{name}{TEMP_SUFFIX}"));
        for temp in leftovers {
            if storage.file_exists(&temp) {
                debug!("removing leftover {temp} from {stage} stage");
                storage
                    .delete_file(&temp)
                    .map_err(|e| StopdexError::stage_io(&stage, e.to_string()))?;
            }
        }

        Ok(StageWriter {
            stage,
            storage,
            artifacts: artifacts.iter().map(|name| name.to_string()).collect(),
            staged: Vec::new(),
        })
    }

    /// The stage name.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Write one artifact under a temporary name.
    ///
    /// `write` receives a checksumming writer and must call
    /// [`ArtifactWriter::record`] once per record.
    pub fn write_artifact<F>(&mut self, name: &str, write: F) -> Result<&ArtifactEntry>
    where
        F: FnOnce(&mut ArtifactWriter<'_>) -> Result<()>,
    {
        if !self.artifacts.iter().any(|known| known == name) {
            return Err(StopdexError::internal(format!(
                "artifact {name} is not declared by the {} stage",
                self.stage
            )));
        }
        if self.staged.iter().any(|entry| entry.name == name) {
            return Err(StopdexError::internal(format!(
                "artifact {name} written twice in {} stage",
                self.stage
            )));
        }

        let temp = format!("{name}{TEMP_SUFFIX}");
        let mut output = self
            .storage
            .create_output(&temp)
            .map_err(|e| StopdexError::stage_io(&self.stage, e.to_string()))?;

        let (checksum, records, bytes) = {
            let mut writer = ArtifactWriter::new(&mut output);
            write(&mut writer)?;
            writer
                .flush()
                .map_err(|e| StopdexError::stage_io(&self.stage, format!("{name}: {e}")))?;
            (writer.hasher.finalize(), writer.records, writer.bytes)
        };
        output
            .close()
            .map_err(|e| StopdexError::stage_io(&self.stage, format!("{name}: {e}")))?;

        debug!("staged {name}: {records} records, {bytes} bytes, crc32 {checksum:08x}");
        self.staged.push(ArtifactEntry {
            name: name.to_string(),
            checksum,
            records,
            bytes,
        });
        Ok(&self.staged[self.staged.len() - 1])
    }

    /// Move every staged artifact into place and write the manifest.
    pub fn commit(self) -> Result<StageManifest> {
        let stage_io = |e: StopdexError| StopdexError::stage_io(&self.stage, e.to_string());

        for entry in &self.staged {
            let temp = format!("{}{TEMP_SUFFIX}", entry.name);
            self.storage.rename_file(&temp, &entry.name).map_err(stage_io)?;
        }

        let manifest = StageManifest {
            stage: self.stage.clone(),
            committed_at: Utc::now(),
            artifacts: self.staged.clone(),
        };
        manifest.store(self.storage.as_ref()).map_err(stage_io)?;

        info!(
            "committed {} stage ({} artifacts)",
            self.stage,
            manifest.artifacts.len()
        );
        Ok(manifest)
    }
}

/// Reads the artifacts of a committed stage.
#[derive(Debug)]
pub struct StageReader {
    storage: Arc<dyn Storage>,
    manifest: StageManifest,
}

impl StageReader {
    /// Open a committed stage. Fails if the stage has no manifest.
    pub fn open(stage: &str, storage: Arc<dyn Storage>) -> Result<Self> {
        let manifest = StageManifest::load(stage, storage.as_ref())?;
        Ok(StageReader { storage, manifest })
    }

    /// Whether the stage has been committed.
    pub fn is_committed(storage: &dyn Storage) -> bool {
        StageManifest::exists(storage)
    }

    /// The stage manifest.
    pub fn manifest(&self) -> &StageManifest {
        &self.manifest
    }

    /// Read an artifact and verify its size and checksum.
    pub fn read_artifact(&self, name: &str) -> Result<Vec<u8>> {
        let stage = self.manifest.stage.as_str();
        let entry = self.manifest.artifact(name).ok_or_else(|| {
            StopdexError::stage_io(stage, format!("{name} is not part of the committed stage"))
        })?;

        let mut input = self
            .storage
            .open_input(name)
            .map_err(|e| StopdexError::stage_io(stage, e.to_string()))?;
        let mut data = Vec::new();
        input
            .read_to_end(&mut data)
            .map_err(|e| StopdexError::stage_io(stage, format!("{name}: {e}")))?;

        if data.len() as u64 != entry.bytes {
            return Err(StopdexError::stage_io(
                stage,
                format!(
                    "{name} is {} bytes, manifest says {}",
                    data.len(),
                    entry.bytes
                ),
            ));
        }
        let checksum = crc32fast::hash(&data);
        if checksum != entry.checksum {
            return Err(StopdexError::stage_io(
                stage,
                format!(
                    "{name} checksum mismatch: {checksum:08x}, manifest says {:08x}",
                    entry.checksum
                ),
            ));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn write_lines(writer: &mut ArtifactWriter<'_>, lines: &[&str]) -> Result<()> {
        for line in lines {
            writeln!(writer, "{line}")?;
            writer.record();
        }
        Ok(())
    }

    #[test]
    fn test_nothing_visible_before_commit() {
        let storage = Arc::new(MemoryStorage::new());
        let mut writer = StageWriter::begin("count", storage.clone(), &["a.tsv", "b.tsv"]).unwrap();
        writer
            .write_artifact("a.tsv", |w| write_lines(w, &["x\t1", "y\t2"]))
            .unwrap();

        assert!(!storage.file_exists("a.tsv"));
        assert!(!StageReader::is_committed(storage.as_ref()));
        assert!(StageReader::open("count", storage.clone()).is_err());

        let manifest = writer.commit().unwrap();
        assert_eq!(manifest.artifacts[0].records, 2);
        assert_eq!(manifest.artifacts[0].bytes, 8);

        let reader = StageReader::open("count", storage).unwrap();
        assert_eq!(reader.read_artifact("a.tsv").unwrap(), b"x\t1\ny\t2\n");
    }

    #[test]
    fn test_begin_withdraws_previous_commit() {
        let storage = Arc::new(MemoryStorage::new());
        let mut writer = StageWriter::begin("count", storage.clone(), &["a.tsv", "b.tsv"]).unwrap();
        writer.write_artifact("a.tsv", |w| write_lines(w, &["x"])).unwrap();
        writer.commit().unwrap();

        storage.put("b.tsv.tmp", b"partial");
        storage.put("_MANIFEST.json.tmp", b"{");
        let _writer = StageWriter::begin("count", storage.clone(), &["a.tsv", "b.tsv"]).unwrap();

        assert!(!StageReader::is_committed(storage.as_ref()));
        assert!(!storage.file_exists("b.tsv.tmp"));
        assert!(!storage.file_exists("_MANIFEST.json.tmp"));
    }

    #[test]
    fn test_begin_keeps_unrelated_temp_files() {
        let storage = Arc::new(MemoryStorage::new());
        storage.put("notes.tmp", b"keep me");
        storage.put("a.tsv.tmp", b"partial");

        let mut writer = StageWriter::begin("index", storage.clone(), &["a.tsv"]).unwrap();
        assert!(!storage.file_exists("a.tsv.tmp"));
        writer.write_artifact("a.tsv", |w| write_lines(w, &["x"])).unwrap();
        writer.commit().unwrap();

        assert!(storage.file_exists("notes.tmp"));
    }

    #[test]
    fn test_undeclared_artifact_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let mut writer = StageWriter::begin("count", storage, &["a.tsv"]).unwrap();
        assert!(writer.write_artifact("z.tsv", |w| write_lines(w, &["x"])).is_err());
    }

    #[test]
    fn test_corruption_is_detected() {
        let storage = Arc::new(MemoryStorage::new());
        let mut writer = StageWriter::begin("select", storage.clone(), &["s.tsv"]).unwrap();
        writer.write_artifact("s.tsv", |w| write_lines(w, &["3\tthe"])).unwrap();
        writer.commit().unwrap();

        storage.put("s.tsv", b"9\tthe\n");
        let reader = StageReader::open("select", storage.clone()).unwrap();
        let err = reader.read_artifact("s.tsv").unwrap_err();
        assert!(matches!(err, StopdexError::StageIo { ref stage, .. } if stage == "select"));

        storage.put("s.tsv", b"3\tthe\nextra\n");
        assert!(reader.read_artifact("s.tsv").is_err());
    }

    #[test]
    fn test_unknown_artifact() {
        let storage = Arc::new(MemoryStorage::new());
        StageWriter::begin("count", storage.clone(), &["a.tsv"])
            .unwrap()
            .commit()
            .unwrap();

        let reader = StageReader::open("count", storage).unwrap();
        assert!(reader.read_artifact("a.tsv").is_err());
    }

    #[test]
    fn test_duplicate_artifact_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let mut writer = StageWriter::begin("count", storage, &["a.tsv"]).unwrap();
        writer.write_artifact("a.tsv", |w| write_lines(w, &["x"])).unwrap();
        assert!(writer.write_artifact("a.tsv", |w| write_lines(w, &["x"])).is_err());
    }
}
