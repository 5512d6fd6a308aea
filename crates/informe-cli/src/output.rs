//! Terminal and file output for the report.

use crate::error::CliResult;
use console::style;
use informe::RunResults;
use std::path::Path;

/// Print the run header and transcript to stdout
pub fn print_transcript(results: &RunResults, use_color: bool) {
    if let Some(started) =
        chrono::DateTime::from_timestamp_millis(results.totals.started_ms as i64)
    {
        println!("Run started {}", started.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    print!("{}", informe::render_transcript(results));
    println!("{}", verdict_line(results, use_color));
}

/// One styled line summing up the run
fn verdict_line(results: &RunResults, use_color: bool) -> String {
    let totals = results.totals;
    if results.all_passed() {
        let prefix = if use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        format!("{prefix} {} of {} specs passed", totals.passed, totals.tests)
    } else {
        let prefix = if use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        format!("{prefix} {} of {} specs failed", totals.failed, totals.tests)
    }
}

/// Write the XML report to a file, or print it when no path is given
pub fn write_report(xml: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, xml)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{xml}"),
    }
    Ok(())
}
