//! Command line argument parsing for the stopdex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::Result;

/// Name of the default work directory inside the output directory.
pub const DEFAULT_WORK_DIR: &str = "_work";

/// stopdex - build a positional inverted index, leaving out the corpus's
/// most frequent terms
#[derive(Parser, Debug, Clone)]
#[command(name = "stopdex")]
#[command(about = "Build a positional inverted index with corpus-derived stopwords")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct StopdexArgs {
    /// Directory of input documents, one document per file
    pub input_dir: PathBuf,

    /// Directory the index is written to
    pub output_dir: PathBuf,

    /// Percent of distinct terms treated as stopwords (0-100)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub rate: Option<u32>,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Directory for intermediate stage artifacts (default: OUTPUT_DIR/_work)
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// JSON pipeline configuration file; command line options override it
    #[arg(short, long, env = "STOPDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reuse committed count and select stages from an earlier run
    #[arg(long)]
    pub resume: bool,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl StopdexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// The directory for intermediate artifacts.
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join(DEFAULT_WORK_DIR))
    }

    /// Resolve the pipeline configuration: the config file if given,
    /// overridden by command line options.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(rate) = self.rate {
            config = config.with_stopword_rate(rate);
        }
        if let Some(threads) = self.threads {
            config = config.with_thread_pool_size(threads);
        }
        if self.resume {
            config = config.with_resume(true);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
