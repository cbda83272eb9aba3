//! Command implementation for the stopdex CLI.

use std::fs;

use log::info;

use crate::cli::args::StopdexArgs;
use crate::cli::output::output_report;
use crate::corpus::DirectoryCorpus;
use crate::error::{Result, StopdexError};
use crate::pipeline::{ArtifactStores, Pipeline, PipelineReport};

/// Execute the CLI command.
pub fn execute_command(args: StopdexArgs) -> Result<()> {
    let report = build_index(&args)?;
    output_report(
        &format!("Index written to {}", args.output_dir.display()),
        &report,
        &args,
    )
}

/// Run the pipeline over `INPUT_DIR`, writing the index to `OUTPUT_DIR`.
pub fn build_index(args: &StopdexArgs) -> Result<PipelineReport> {
    let config = args.pipeline_config()?;
    let corpus = DirectoryCorpus::open(&args.input_dir)?;

    fs::create_dir_all(&args.output_dir)?;
    if fs::canonicalize(&args.input_dir)? == fs::canonicalize(&args.output_dir)? {
        return Err(StopdexError::invalid_argument(
            "output directory must differ from the input directory",
        ));
    }

    let work_dir = args.work_dir();
    info!(
        "indexing {} into {} (work directory {})",
        args.input_dir.display(),
        args.output_dir.display(),
        work_dir.display()
    );

    let stores = ArtifactStores::on_disk(&work_dir, &args.output_dir)?;
    Pipeline::new(config)?.run(&corpus, &stores)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_build_index() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("doc1"), "the cat sat\n").unwrap();
        fs::write(input.path().join("doc2"), "the dog sat\n").unwrap();

        let args = StopdexArgs::try_parse_from([
            OsStr::new("stopdex"),
            input.path().as_os_str(),
            output.path().as_os_str(),
            OsStr::new("--rate"),
            OsStr::new("25"),
        ])
        .unwrap();
        let report = build_index(&args).unwrap();

        assert_eq!(report.stopwords, 1);
        assert!(output.path().join("index.tsv").is_file());
        assert!(output.path().join("_work/count/frequencies.tsv").is_file());
    }

    #[test]
    fn test_missing_input_directory() {
        let output = TempDir::new().unwrap();
        let args = StopdexArgs::try_parse_from([
            OsStr::new("stopdex"),
            output.path().join("nope").as_os_str(),
            output.path().as_os_str(),
        ])
        .unwrap();

        assert!(matches!(build_index(&args), Err(StopdexError::Input(_))));
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let dir = TempDir::new().unwrap();
        let args = StopdexArgs::try_parse_from([
            OsStr::new("stopdex"),
            dir.path().as_os_str(),
            dir.path().as_os_str(),
        ])
        .unwrap();

        assert!(build_index(&args).is_err());
    }
}
