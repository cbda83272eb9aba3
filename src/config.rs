//! Configuration for pipeline runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StopdexError};

/// Default stopword rate, in percent of the vocabulary.
pub const DEFAULT_STOPWORD_RATE: u32 = 1;

/// Configuration for a pipeline run.
///
/// Can be loaded from a JSON file; missing fields take their defaults.
///
/// ```
/// use stopdex::config::PipelineConfig;
///
/// let config: PipelineConfig = serde_json::from_str(r#"{ "stopword_rate": 5 }"#).unwrap();
/// assert_eq!(config.stopword_rate, 5);
/// assert!(config.thread_pool_size.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Percent of distinct terms, taken from the top of the frequency
    /// ranking, that become stopwords. Must be in `0..=100`.
    pub stopword_rate: u32,

    /// Thread pool size for parallel stages.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,

    /// Reuse already committed count/select stages instead of recomputing them.
    pub resume: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stopword_rate: DEFAULT_STOPWORD_RATE,
            thread_pool_size: None,
            resume: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StopdexError::invalid_config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the stopword rate.
    pub fn with_stopword_rate(mut self, rate: u32) -> Self {
        self.stopword_rate = rate;
        self
    }

    /// Set the thread pool size.
    pub fn with_thread_pool_size(mut self, threads: usize) -> Self {
        self.thread_pool_size = Some(threads);
        self
    }

    /// Enable or disable resuming from committed stages.
    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    /// The number of worker threads this configuration resolves to.
    pub fn effective_threads(&self) -> usize {
        self.thread_pool_size.unwrap_or_else(num_cpus::get)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.stopword_rate > 100 {
            return Err(StopdexError::invalid_config(format!(
                "stopword_rate must be between 0 and 100, got {}",
                self.stopword_rate
            )));
        }
        if self.thread_pool_size == Some(0) {
            return Err(StopdexError::invalid_config(
                "thread_pool_size must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.stopword_rate, 1);
        assert!(config.thread_pool_size.is_none());
        assert!(!config.resume);
        assert!(config.effective_threads() > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_stopword_rate(25)
            .with_thread_pool_size(3)
            .with_resume(true);

        assert_eq!(config.stopword_rate, 25);
        assert_eq!(config.effective_threads(), 3);
        assert!(config.resume);
    }

    #[test]
    fn test_validation() {
        assert!(PipelineConfig::default().with_stopword_rate(0).validate().is_ok());
        assert!(PipelineConfig::default().with_stopword_rate(100).validate().is_ok());
        assert!(PipelineConfig::default().with_stopword_rate(101).validate().is_err());
        assert!(PipelineConfig::default().with_thread_pool_size(0).validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        fs::write(&path, r#"{ "stopword_rate": 10, "thread_pool_size": 2 }"#).unwrap();
        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.stopword_rate, 10);
        assert_eq!(config.thread_pool_size, Some(2));

        fs::write(&path, r#"{ "stopword_rate": 250 }"#).unwrap();
        assert!(PipelineConfig::from_json_file(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(&path),
            Err(StopdexError::Json(_))
        ));
    }
}
