//! Human-readable console transcript of a run.
//!
//! Walks the result tree and prints what a developer wants to read after a
//! run: a summary line, a one-character-per-spec progress strip, the
//! suite/spec hierarchy, and the details of every failure. Pure string
//! building; the caller decides where it goes.

use crate::model::{RunResults, SpecNode, SuiteNode};

const RULE: &str = "----------------------------------------------------------------------";
const GUTTER: &str = "    ";

/// Render the full transcript for a run
#[must_use]
pub fn render_transcript(results: &RunResults) -> String {
    let totals = results.totals;
    let mut out = String::new();

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Test Summary - {}, {}, {} pending in {:.3}s\n",
        plural(totals.tests, "spec"),
        plural(totals.failed, "failure"),
        totals.pending,
        totals.duration_secs,
    ));
    out.push_str(RULE);
    out.push('\n');

    let mut symbols = String::new();
    for suite in &results.suites {
        push_symbols(&mut symbols, suite);
    }
    if !symbols.is_empty() {
        out.push_str(&symbols);
        out.push('\n');
    }

    if !results.suites.is_empty() {
        out.push('\n');
        for suite in &results.suites {
            push_suite(&mut out, suite, "");
        }
    }

    let mut failures = Vec::new();
    for suite in &results.suites {
        collect_failures(suite, &mut failures);
    }
    if !failures.is_empty() {
        out.push('\n');
        for spec in failures {
            push_failure(&mut out, spec);
        }
    }

    out
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// One character per spec, in tree order: `.` passed, `*` pending, `x` failed
fn push_symbols(out: &mut String, suite: &SuiteNode) {
    for spec in &suite.specs {
        out.push(if spec.status.is_passed() {
            '.'
        } else if spec.status.is_pending() {
            '*'
        } else {
            'x'
        });
    }
    for child in &suite.suites {
        push_symbols(out, child);
    }
}

fn push_suite(out: &mut String, suite: &SuiteNode, gutter: &str) {
    out.push_str(&format!("{gutter}Suite: {}\n", suite.description));
    for spec in &suite.specs {
        out.push_str(&format!("{gutter}{GUTTER}it: {}\n", spec.description));
    }
    let nested = format!("{gutter}{GUTTER}");
    for child in &suite.suites {
        push_suite(out, child, &nested);
    }
}

fn collect_failures<'a>(suite: &'a SuiteNode, failures: &mut Vec<&'a SpecNode>) {
    for spec in &suite.specs {
        if spec.status.is_failed() {
            failures.push(spec);
        }
    }
    for child in &suite.suites {
        collect_failures(child, failures);
    }
}

fn push_failure(out: &mut String, spec: &SpecNode) {
    out.push_str(&format!("Failed test: {}\n", spec.full_name));
    for expectation in &spec.failed_expectations {
        out.push_str(&expectation.message);
        out.push('\n');
        if let Some(stack) = &expectation.stack {
            out.push_str("\nStack-trace:\n");
            out.push_str(stack);
            out.push('\n');
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FakeClock};
    use crate::collector::RunCollector;
    use crate::model::{FailedExpectation, SpecDescriptor, SpecStatus, SuiteDescriptor};
    use std::sync::Arc;

    fn sample_run() -> RunResults {
        let clock: Clock = Arc::new(FakeClock::new());
        clock.install(1_000_000);
        let mut collector = RunCollector::with_clock(Arc::clone(&clock));
        collector.run_started().unwrap();

        let outer = SuiteDescriptor::new("outer", "math utilities", "math utilities");
        collector.suite_started(&outer).unwrap();

        let adds = SpecDescriptor::new("p1", "math utilities adds", "adds")
            .with_status(SpecStatus::Passed);
        collector.spec_started(&adds).unwrap();
        clock.advance_ms(100);
        collector.spec_done(&adds).unwrap();

        let divides = SpecDescriptor::new("p2", "math utilities divides", "divides")
            .with_status(SpecStatus::Failed)
            .with_failure(
                FailedExpectation::new("expected 1 to be 2").with_stack("at math.rs:7"),
            );
        collector.spec_started(&divides).unwrap();
        clock.advance_ms(100);
        collector.spec_done(&divides).unwrap();

        let inner = SuiteDescriptor::new("inner", "math utilities edge cases", "edge cases");
        collector.suite_started(&inner).unwrap();
        let zero = SpecDescriptor::new("p3", "math utilities edge cases handles zero", "handles zero")
            .with_status(SpecStatus::Pending);
        collector.spec_started(&zero).unwrap();
        collector.spec_done(&zero).unwrap();
        collector.suite_done(&inner).unwrap();

        collector.suite_done(&outer).unwrap();
        clock.advance_ms(300);
        collector.run_done().unwrap();
        collector.into_results()
    }

    #[test]
    fn test_summary_line() {
        let transcript = render_transcript(&sample_run());
        assert!(transcript.contains("Test Summary - 3 specs, 1 failure, 1 pending in 0.500s"));
    }

    #[test]
    fn test_symbol_strip_in_tree_order() {
        let transcript = render_transcript(&sample_run());
        assert!(transcript.contains("\n.x*\n"));
    }

    #[test]
    fn test_suite_tree_gutters() {
        let transcript = render_transcript(&sample_run());
        assert!(transcript.contains("Suite: math utilities\n"));
        assert!(transcript.contains("    it: adds\n"));
        assert!(transcript.contains("    it: divides\n"));
        assert!(transcript.contains("    Suite: edge cases\n"));
        assert!(transcript.contains("        it: handles zero\n"));
    }

    #[test]
    fn test_failure_details() {
        let transcript = render_transcript(&sample_run());
        assert!(transcript.contains("Failed test: math utilities divides\n"));
        assert!(transcript.contains("expected 1 to be 2\n"));
        assert!(transcript.contains("Stack-trace:\nat math.rs:7\n"));
    }

    #[test]
    fn test_failure_without_stack_omits_trace_block() {
        let clock: Clock = Arc::new(FakeClock::new());
        clock.install(0);
        let mut collector = RunCollector::with_clock(Arc::clone(&clock));
        collector.run_started().unwrap();
        let sd = SuiteDescriptor::new("s1", "suite", "suite");
        collector.suite_started(&sd).unwrap();
        let pd = SpecDescriptor::new("p1", "suite boom", "boom")
            .with_status(SpecStatus::Failed)
            .with_failure(FailedExpectation::new("went wrong"));
        collector.spec_started(&pd).unwrap();
        collector.spec_done(&pd).unwrap();
        collector.suite_done(&sd).unwrap();
        collector.run_done().unwrap();

        let transcript = render_transcript(&collector.into_results());
        assert!(transcript.contains("went wrong"));
        assert!(!transcript.contains("Stack-trace:"));
    }

    #[test]
    fn test_empty_run_has_summary_only() {
        let transcript = render_transcript(&RunResults::default());
        assert!(transcript.contains("Test Summary - 0 specs, 0 failures, 0 pending"));
        assert!(!transcript.contains("Suite:"));
        assert!(!transcript.contains("Failed test:"));
    }
}
