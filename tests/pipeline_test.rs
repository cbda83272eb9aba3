//! End-to-end tests of the pipeline over directory corpora.

use std::fs;
use std::path::Path;

use stopdex::config::PipelineConfig;
use stopdex::corpus::DirectoryCorpus;
use stopdex::error::{Result, StopdexError};
use stopdex::pipeline::{ArtifactStores, Pipeline, StageStatus, load_index, load_stopwords};
use tempfile::TempDir;

fn write_corpus(dir: &Path, documents: &[(&str, &str)]) {
    for (name, text) in documents {
        fs::write(dir.join(name), text).unwrap();
    }
}

fn run(input: &Path, output: &Path, config: PipelineConfig) -> Result<()> {
    let corpus = DirectoryCorpus::open(input)?;
    let stores = ArtifactStores::on_disk(output.join("_work"), output)?;
    Pipeline::new(config)?.run(&corpus, &stores)?;
    Ok(())
}

#[test]
fn test_scenario_artifacts_on_disk() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(
        input.path(),
        &[("doc1", "the cat sat\n"), ("doc2", "the dog sat\n")],
    );

    run(
        input.path(),
        output.path(),
        PipelineConfig::default().with_stopword_rate(25),
    )?;

    let work = output.path().join("_work");
    assert_eq!(
        fs::read_to_string(work.join("count/frequencies.tsv"))?,
        "cat\t1\ndog\t1\nsat\t2\nthe\t2\n"
    );
    assert_eq!(fs::read_to_string(work.join("count/vocabulary-size"))?, "4\n");
    assert_eq!(fs::read_to_string(work.join("select/stopwords.tsv"))?, "2\tsat\n");
    assert_eq!(
        fs::read_to_string(output.path().join("index.tsv"))?,
        "cat\tdoc1,0,2;\ndog\tdoc2,0,2;\nthe\tdoc1,0,1;doc2,0,1;\n"
    );

    for stage_dir in [work.join("count"), work.join("select"), output.path().to_path_buf()] {
        assert!(stage_dir.join("_MANIFEST.json").is_file());
        let leftovers: Vec<_> = fs::read_dir(&stage_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    Ok(())
}

#[test]
fn test_unrelated_files_in_output_survive() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(input.path(), &[("doc1", "the cat sat
")]);
    fs::write(output.path().join("notes.tmp"), "keep")?;
    fs::write(output.path().join("index.tsv.tmp"), "partial")?;

    run(input.path(), output.path(), PipelineConfig::default())?;

    assert_eq!(fs::read_to_string(output.path().join("notes.tmp"))?, "keep");
    assert!(!output.path().join("index.tsv.tmp").exists());
    Ok(())
}

#[test]
fn test_rerun_is_idempotent() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(
        input.path(),
        &[
            ("a.txt", "To be, or not to be: that is the question.\n"),
            ("b.txt", "Whether 'tis nobler in the mind to suffer\n"),
            ("c.txt", "The slings and arrows of outrageous fortune,\n"),
        ],
    );
    let config = PipelineConfig::default().with_stopword_rate(10);

    run(input.path(), output.path(), config.clone())?;
    let first = fs::read(output.path().join("index.tsv"))?;
    let first_stopwords = fs::read(output.path().join("_work/select/stopwords.tsv"))?;

    run(input.path(), output.path(), config)?;
    assert_eq!(fs::read(output.path().join("index.tsv"))?, first);
    assert_eq!(
        fs::read(output.path().join("_work/select/stopwords.tsv"))?,
        first_stopwords
    );

    Ok(())
}

#[test]
fn test_output_independent_of_thread_count() -> Result<()> {
    let input = TempDir::new()?;
    for i in 0..25 {
        fs::write(
            input.path().join(format!("doc{i:02}")),
            format!("alpha beta w{}\ngamma w{} beta\n\nalpha {}\n", i % 5, i % 7, i),
        )?;
    }

    let mut outputs = Vec::new();
    for threads in [1, 2, 8] {
        let output = TempDir::new()?;
        run(
            input.path(),
            output.path(),
            PipelineConfig::default()
                .with_stopword_rate(20)
                .with_thread_pool_size(threads),
        )?;
        outputs.push((
            fs::read(output.path().join("_work/count/frequencies.tsv"))?,
            fs::read(output.path().join("_work/select/stopwords.tsv"))?,
            fs::read(output.path().join("index.tsv"))?,
        ));
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    Ok(())
}

#[test]
fn test_resume_reuses_committed_stages() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(
        input.path(),
        &[("doc1", "the cat sat\n"), ("doc2", "the dog sat\n")],
    );
    let corpus = DirectoryCorpus::open(input.path())?;
    let stores = ArtifactStores::on_disk(output.path().join("_work"), output.path())?;

    Pipeline::new(PipelineConfig::default().with_stopword_rate(25))?.run(&corpus, &stores)?;

    // A changed corpus is not seen by a resumed count stage.
    fs::write(input.path().join("doc3"), "zebra\n")?;
    let report = Pipeline::new(
        PipelineConfig::default()
            .with_stopword_rate(25)
            .with_resume(true),
    )?
    .run(&corpus, &stores)?;

    assert_eq!(report.stage("count").unwrap().status, StageStatus::Reused);
    assert_eq!(report.stage("select").unwrap().status, StageStatus::Reused);
    assert_eq!(report.vocabulary_size, 4);

    let index = load_index(stores.output.clone())?;
    assert_eq!(index.get("zebra").unwrap().to_string(), "doc3,0,1;");
    Ok(())
}

#[test]
fn test_corrupted_stopwords_are_rejected() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(
        input.path(),
        &[("doc1", "the cat sat\n"), ("doc2", "the dog sat\n")],
    );
    run(
        input.path(),
        output.path(),
        PipelineConfig::default().with_stopword_rate(25),
    )?;

    let stopwords = output.path().join("_work/select/stopwords.tsv");
    fs::write(&stopwords, "2\tthe\n")?;

    let stores = ArtifactStores::on_disk(output.path().join("_work"), output.path())?;
    let err = load_stopwords(stores.select.clone()).unwrap_err();
    assert!(matches!(err, StopdexError::StageIo { ref stage, .. } if stage == "select"));

    let corpus = DirectoryCorpus::open(input.path())?;
    let resumed = Pipeline::new(
        PipelineConfig::default()
            .with_stopword_rate(25)
            .with_resume(true),
    )?
    .run(&corpus, &stores);
    assert!(resumed.is_err());
    Ok(())
}

#[test]
fn test_uncommitted_count_stage_is_not_consumed() -> Result<()> {
    let output = TempDir::new()?;
    let stores = ArtifactStores::on_disk(output.path().join("_work"), output.path())?;
    fs::write(output.path().join("_work/count/frequencies.tsv"), "the\t2\n")?;
    fs::write(output.path().join("_work/count/vocabulary-size"), "1\n")?;

    let err = Pipeline::new(PipelineConfig::default())?
        .run_select_stage(&stores.count, &stores.select)
        .unwrap_err();
    assert!(matches!(err, StopdexError::StageIo { .. }));
    Ok(())
}

#[test]
fn test_empty_and_all_stopword_documents() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;
    write_corpus(
        input.path(),
        &[
            ("empty", ""),
            ("noise", "the the the\nthe\n"),
            ("text", "the quick fox\n"),
            (".hidden", "ignored words here\n"),
        ],
    );

    run(
        input.path(),
        output.path(),
        PipelineConfig::default().with_stopword_rate(34),
    )?;

    let stores = ArtifactStores::on_disk(output.path().join("_work"), output.path())?;
    let (stopwords, summary) = load_stopwords(stores.select.clone())?;
    assert_eq!(summary.vocabulary_size, 3);
    assert_eq!(stopwords.terms(), &["the".to_string()]);

    let index = load_index(stores.output.clone())?;
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["fox", "quick"]);
    assert_eq!(index.get("fox").unwrap().to_string(), "text,0,3;");
    Ok(())
}

#[test]
fn test_empty_corpus() -> Result<()> {
    let input = TempDir::new()?;
    let output = TempDir::new()?;

    run(input.path(), output.path(), PipelineConfig::default())?;

    assert_eq!(fs::read_to_string(output.path().join("index.tsv"))?, "");
    assert_eq!(
        fs::read_to_string(output.path().join("_work/count/vocabulary-size"))?,
        "0\n"
    );
    Ok(())
}
