//! Informe: test lifecycle aggregation and JUnit-style XML reporting
//!
//! Informe (Spanish: "report") listens to the lifecycle events a test
//! driver emits — run/suite/spec started and done — builds a result tree
//! with timing and pass/fail/pending counters at every level, and renders
//! it as a CI-ingestible `<testsuites>` XML document and a human console
//! transcript.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     INFORME Data Flow                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────┐              │
//! │  │ Lifecycle │   │ RunCollector │   │ serialize() │  flat XML    │
//! │  │ events    │──►│ (suite stack,│──►│ + pretty_   │─────────────►│
//! │  │ (driver)  │   │  counters)   │   │   print()   │  transcript  │
//! │  └───────────┘   └──────────────┘   └─────────────┘              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The collector is synchronous and single-threaded by design: the driver
//! delivers one event at a time. Serialization and pretty-printing are
//! pure functions over the frozen tree.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod clock;
mod collector;
mod escape;
mod format;
mod junit;
mod model;
mod result;
mod transcript;
mod wait;

pub use clock::{create_clock, Clock, FakeClock};
pub use collector::{RunCollector, RunState};
pub use escape::{escape_xml, unescape_xml};
pub use format::pretty_print;
pub use junit::serialize;
pub use model::{
    FailedExpectation, LifecycleEvent, RunResults, RunTotals, SpecDescriptor, SpecNode,
    SpecStatus, SuiteCounters, SuiteDescriptor, SuiteNode,
};
pub use result::{InformeError, InformeResult};
pub use transcript::render_transcript;
pub use wait::{
    wait_for, wait_until, FnCondition, WaitCondition, WaitOptions, WaitResult,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::clock::*;
    pub use super::collector::*;
    pub use super::escape::*;
    pub use super::format::*;
    pub use super::junit::*;
    pub use super::model::*;
    pub use super::result::*;
    pub use super::transcript::*;
    pub use super::wait::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// End-to-end: events in, indented XML and transcript out
    #[test]
    fn test_full_pipeline() {
        let clock = create_clock();
        clock.install(1_000_000);
        let mut collector = RunCollector::with_clock(Arc::clone(&clock));

        collector.run_started().unwrap();
        let suite = SuiteDescriptor::new("s1", "parser", "parser");
        collector.suite_started(&suite).unwrap();
        let spec = SpecDescriptor::new("p1", "parser accepts empty input", "accepts empty input")
            .with_status(SpecStatus::Passed);
        collector.spec_started(&spec).unwrap();
        clock.advance_ms(42);
        collector.spec_done(&spec).unwrap();
        collector.suite_done(&suite).unwrap();
        collector.run_done().unwrap();

        let results = collector.into_results();
        let flat = serialize(&results);
        assert!(flat.starts_with("<testsuites>"));
        assert!(flat.ends_with("</testsuites>"));

        let pretty = pretty_print(&flat);
        assert!(pretty.contains("\n    <testsuite "));
        assert!(pretty.contains("\n        <testcase "));

        let transcript = render_transcript(&results);
        assert!(transcript.contains("Suite: parser"));
        assert!(transcript.contains("    it: accepts empty input"));
    }
}
