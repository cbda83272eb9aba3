//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, StopdexArgs};
use crate::error::Result;
use crate::pipeline::PipelineReport;

/// Output a pipeline report in the requested format.
pub fn output_report(message: &str, report: &PipelineReport, args: &StopdexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            print!("{}", format_report_human(report));
            Ok(())
        }
        OutputFormat::Json => output_json(report, args),
    }
}

/// Render a report for people.
pub fn format_report_human(report: &PipelineReport) -> String {
    let mut out = String::new();

    out.push_str("Pipeline Summary:\n");
    out.push_str("═════════════════\n");
    out.push_str(&format!("Documents: {}\n", report.documents));
    out.push_str(&format!("Distinct terms: {}\n", report.vocabulary_size));
    out.push_str(&format!(
        "Stopwords: {} ({}%)\n",
        report.stopwords, report.stopword_rate
    ));
    out.push_str(&format!("Indexed terms: {}\n", report.indexed_terms));
    out.push_str(&format!("Postings: {}\n", report.postings));
    out.push_str(&format!("Suppressed occurrences: {}\n", report.suppressed_tokens));

    out.push('\n');
    out.push_str("Stages:\n");
    out.push_str("───────\n");
    for stage in &report.stages {
        out.push_str(&format!(
            "{:<8} {:<10} {:>10} records {:>10.1}ms\n",
            stage.stage, stage.status, stage.records, stage.elapsed_ms
        ));
    }
    out.push_str(&format!("\nTotal time: {:.1}ms\n", report.elapsed_ms));
    out
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &StopdexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::pipeline::{StageReport, StageStatus};

    #[test]
    fn test_format_report_human() {
        let report = PipelineReport {
            stages: vec![StageReport::new(
                "count",
                StageStatus::Completed,
                Duration::from_millis(3),
                4,
            )],
            documents: 2,
            vocabulary_size: 4,
            stopword_rate: 25,
            stopwords: 1,
            indexed_terms: 3,
            postings: 4,
            suppressed_tokens: 2,
            elapsed_ms: 5.0,
        };

        let text = format_report_human(&report);
        assert!(text.contains("Distinct terms: 4"));
        assert!(text.contains("Stopwords: 1 (25%)"));
        assert!(text.contains("count"));
        assert!(text.contains("completed"));
        assert!(text.contains("Total time: 5.0ms"));
    }
}
