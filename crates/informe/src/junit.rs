//! JUnit-style XML serialization of a result tree.
//!
//! [`serialize`] is a pure function from a frozen [`RunResults`] to a flat
//! single-line document: `<testsuites>` wrapping one `<testsuite>` per
//! top-level suite, testcases before nested suites, everything escaped.
//! Run it through [`crate::format::pretty_print`] for the indented form.

use crate::escape::escape_xml;
use crate::model::{RunResults, SpecNode, SuiteNode};

/// Render the result tree as a JUnit-style XML document
///
/// Referentially transparent: the same unmutated tree always yields
/// byte-identical output. A partial tree (serialized before run-done)
/// still produces a well-formed document.
#[must_use]
pub fn serialize(results: &RunResults) -> String {
    let mut xml = String::new();
    xml.push_str("<testsuites>");
    for suite in &results.suites {
        push_suite(&mut xml, suite);
    }
    xml.push_str("</testsuites>");
    xml
}

fn push_suite(xml: &mut String, suite: &SuiteNode) {
    xml.push_str(&format!(
        r#"<testsuite name="{}" tests="{}" failures="{}" skips="{}" time="{:.3}">"#,
        escape_xml(&suite.full_name),
        suite.counters.tests,
        suite.counters.failed,
        suite.counters.pending,
        suite.duration_secs,
    ));
    // testcases first, nested suites second, both in insertion order
    for spec in &suite.specs {
        push_spec(xml, spec);
    }
    for child in &suite.suites {
        push_suite(xml, child);
    }
    xml.push_str("</testsuite>");
}

fn push_spec(xml: &mut String, spec: &SpecNode) {
    xml.push_str(&format!(
        r#"<testcase classname="{}" name="{}" time="{:.3}">"#,
        escape_xml(&spec.full_name),
        escape_xml(&spec.description),
        spec.duration_secs,
    ));
    if spec.status.is_pending() {
        xml.push_str("<skipped/>");
    }
    if spec.status.is_failed() {
        for expectation in &spec.failed_expectations {
            xml.push_str(&format!(
                r#"<failure message="{}">"#,
                escape_xml(expectation.message.trim()),
            ));
            xml.push_str(&escape_xml(expectation.body()));
            xml.push_str("</failure>");
        }
    }
    xml.push_str("</testcase>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FakeClock};
    use crate::collector::RunCollector;
    use crate::model::{FailedExpectation, SpecDescriptor, SpecStatus, SuiteDescriptor};
    use std::sync::Arc;

    fn collect<F>(drive: F) -> RunResults
    where
        F: FnOnce(&mut RunCollector, &Clock),
    {
        let clock: Clock = Arc::new(FakeClock::new());
        clock.install(1_000_000);
        let mut collector = RunCollector::with_clock(Arc::clone(&clock));
        collector.run_started().unwrap();
        drive(&mut collector, &clock);
        collector.run_done().unwrap();
        collector.into_results()
    }

    fn one_spec_run(status: SpecStatus, expectations: Vec<FailedExpectation>) -> RunResults {
        collect(|collector, clock| {
            let sd = SuiteDescriptor::new("s1", "math utilities", "math utilities");
            collector.suite_started(&sd).unwrap();
            let mut pd = SpecDescriptor::new("p1", "math utilities adds", "adds")
                .with_status(status);
            pd.failed_expectations = expectations;
            collector.spec_started(&pd).unwrap();
            clock.advance_ms(125);
            collector.spec_done(&pd).unwrap();
            collector.suite_done(&sd).unwrap();
        })
    }

    #[test]
    fn test_empty_run() {
        let results = RunResults::default();
        assert_eq!(serialize(&results), "<testsuites></testsuites>");
    }

    #[test]
    fn test_passed_spec_has_no_children() {
        let xml = serialize(&one_spec_run(SpecStatus::Passed, Vec::new()));
        assert!(xml.starts_with("<testsuites>"));
        assert!(xml.ends_with("</testsuites>"));
        assert!(xml.contains(
            r#"<testsuite name="math utilities" tests="1" failures="0" skips="0" time="0.125">"#
        ));
        assert!(xml.contains(
            r#"<testcase classname="math utilities adds" name="adds" time="0.125"></testcase>"#
        ));
        assert!(!xml.contains("<failure"));
        assert!(!xml.contains("<skipped/>"));
    }

    #[test]
    fn test_failed_spec_renders_failure_per_expectation() {
        let xml = serialize(&one_spec_run(
            SpecStatus::Failed,
            vec![
                FailedExpectation::new("  expected true to be false  ").with_stack("at foo.js:1"),
                FailedExpectation::new("second check"),
            ],
        ));
        // message is trimmed then escaped; body is the stack, else the message
        assert!(xml.contains(r#"<failure message="expected true to be false">at foo.js:1</failure>"#));
        assert!(xml.contains(r#"<failure message="second check">second check</failure>"#));
        assert!(xml.contains(r#"failures="1""#));
    }

    #[test]
    fn test_pending_spec_renders_skipped() {
        let xml = serialize(&one_spec_run(SpecStatus::Pending, Vec::new()));
        assert!(xml.contains("<skipped/>"));
        assert!(!xml.contains("<failure"));
        assert!(xml.contains(r#"skips="1""#));
    }

    #[test]
    fn test_nested_suite_comes_after_testcases() {
        let results = collect(|collector, _clock| {
            let outer = SuiteDescriptor::new("outer", "outer", "outer");
            let inner = SuiteDescriptor::new("inner", "outer inner", "inner");
            collector.suite_started(&outer).unwrap();
            let direct = SpecDescriptor::new("d1", "outer direct", "direct")
                .with_status(SpecStatus::Passed);
            collector.spec_started(&direct).unwrap();
            collector.spec_done(&direct).unwrap();
            collector.suite_started(&inner).unwrap();
            let nested = SpecDescriptor::new("n1", "outer inner nested", "nested")
                .with_status(SpecStatus::Passed);
            collector.spec_started(&nested).unwrap();
            collector.spec_done(&nested).unwrap();
            collector.suite_done(&inner).unwrap();
            collector.suite_done(&outer).unwrap();
        });
        let xml = serialize(&results);

        let direct_case = xml.find(r#"<testcase classname="outer direct""#).unwrap();
        let inner_suite = xml.find(r#"<testsuite name="outer inner""#).unwrap();
        assert!(direct_case < inner_suite, "testcases must precede nested suites");
        // inner counters reflect only its own spec
        assert!(xml.contains(r#"<testsuite name="outer inner" tests="1""#));
        assert!(xml.contains(r#"<testsuite name="outer" tests="1""#));
    }

    #[test]
    fn test_attribute_escaping() {
        let results = collect(|collector, clock| {
            let sd = SuiteDescriptor::new("s1", r#"suite <"&'> chars"#, "chars");
            collector.suite_started(&sd).unwrap();
            let pd = SpecDescriptor::new("p1", r#"suite <"&'> chars spec"#, r#"spec "quoted""#)
                .with_status(SpecStatus::Failed)
                .with_failure(FailedExpectation::new("a < b && c > d"));
            collector.spec_started(&pd).unwrap();
            clock.advance_ms(1);
            collector.spec_done(&pd).unwrap();
            collector.suite_done(&sd).unwrap();
        });
        let xml = serialize(&results);
        assert!(xml.contains(r#"name="suite &lt;&quot;&amp;&apos;&gt; chars""#));
        assert!(xml.contains(r#"name="spec &quot;quoted&quot;""#));
        assert!(xml.contains(r#"message="a &lt; b &amp;&amp; c &gt; d""#));
        assert!(xml.contains(">a &lt; b &amp;&amp; c &gt; d</failure>"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let results = one_spec_run(
            SpecStatus::Failed,
            vec![FailedExpectation::new("boom").with_stack("trace")],
        );
        assert_eq!(serialize(&results), serialize(&results));
    }
}
