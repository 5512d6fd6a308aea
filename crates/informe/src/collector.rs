//! Event-driven run collector.
//!
//! A [`RunCollector`] listens to the six lifecycle notifications a test
//! driver emits (run/suite/spec started and done) and builds the result
//! tree. Nesting is tracked with an explicit stack of open suites owned by
//! the collector, so several collectors can run side by side without
//! shared state; an unbalanced `suite_done` is rejected instead of
//! silently corrupting the tree.
//!
//! The driver delivers events one at a time on a single logical thread;
//! no operation blocks or performs I/O. Once [`RunCollector::run_done`]
//! returns, the tree never changes again and may be serialized from any
//! thread.

use crate::clock::{create_clock, Clock};
use crate::model::{
    LifecycleEvent, RunResults, SpecDescriptor, SpecNode, SuiteDescriptor, SuiteNode,
};
use crate::result::{InformeError, InformeResult};
use std::collections::HashMap;

/// Collector lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run started yet
    Idle,
    /// Between run-started and run-done
    Running,
    /// Run finished; the tree is frozen
    Done,
}

/// Stateful listener that aggregates lifecycle events into a result tree
#[derive(Debug)]
pub struct RunCollector {
    state: RunState,
    clock: Clock,
    /// Open suites, innermost last. Pushed on suite-started, popped and
    /// attached to the new top (or the root) on suite-done.
    open_suites: Vec<SuiteNode>,
    /// Start times of specs that have started but not finished, by id
    open_specs: HashMap<String, u64>,
    results: RunResults,
}

impl Default for RunCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl RunCollector {
    /// Create a collector reading system time
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(create_clock())
    }

    /// Create a collector with an explicit clock handle
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: RunState::Idle,
            clock,
            open_suites: Vec::new(),
            open_specs: HashMap::new(),
            results: RunResults::default(),
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Check whether the run has finished
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == RunState::Done
    }

    /// Aggregated results so far
    ///
    /// Reading before [`Self::run_done`] yields the partial tree: suites
    /// still open are not attached yet.
    #[must_use]
    pub fn results(&self) -> &RunResults {
        &self.results
    }

    /// Consume the collector and take the results
    #[must_use]
    pub fn into_results(self) -> RunResults {
        self.results
    }

    /// Dispatch a wire event to the matching hook
    pub fn apply(&mut self, event: LifecycleEvent) -> InformeResult<()> {
        match event {
            LifecycleEvent::RunStarted => self.run_started(),
            LifecycleEvent::SuiteStarted(descriptor) => self.suite_started(&descriptor),
            LifecycleEvent::SuiteDone(descriptor) => self.suite_done(&descriptor),
            LifecycleEvent::SpecStarted(descriptor) => self.spec_started(&descriptor),
            LifecycleEvent::SpecDone(descriptor) => self.spec_done(&descriptor),
            LifecycleEvent::RunDone => self.run_done(),
        }
    }

    /// Record the run start time
    ///
    /// A second call while running resets the start time (last call wins).
    /// Calling after the run finished is a protocol violation.
    pub fn run_started(&mut self) -> InformeResult<()> {
        if self.state == RunState::Done {
            return Err(InformeError::protocol("runStarted after runDone"));
        }
        self.state = RunState::Running;
        self.results.totals.started_ms = self.clock.now_ms();
        Ok(())
    }

    /// Open a suite and make it the current attachment point
    pub fn suite_started(&mut self, descriptor: &SuiteDescriptor) -> InformeResult<()> {
        self.expect_running("suiteStarted")?;
        descriptor.validate()?;
        let node = SuiteNode::started(descriptor, self.clock.now_ms());
        self.open_suites.push(node);
        Ok(())
    }

    /// Close the innermost open suite
    ///
    /// The descriptor must identify that suite; closing out of order is a
    /// protocol violation. The finished node is attached to its enclosing
    /// suite, or to the top level when none remains open.
    pub fn suite_done(&mut self, descriptor: &SuiteDescriptor) -> InformeResult<()> {
        self.expect_running("suiteDone")?;
        descriptor.validate()?;
        let Some(mut node) = self.open_suites.pop() else {
            return Err(InformeError::protocol(format!(
                "suiteDone for {} with no open suite",
                descriptor.id
            )));
        };
        if node.id != descriptor.id {
            // Put it back so the caller can observe the unchanged state.
            let open_id = node.id.clone();
            self.open_suites.push(node);
            return Err(InformeError::protocol(format!(
                "suiteDone for {} but the open suite is {open_id}",
                descriptor.id
            )));
        }
        node.duration_secs = elapsed_secs(node.start_ms, self.clock.now_ms());
        match self.open_suites.last_mut() {
            Some(parent) => parent.suites.push(node),
            None => self.results.suites.push(node),
        }
        Ok(())
    }

    /// Record the start time of a spec
    ///
    /// Does not touch the tree; the spec attaches on its done event.
    pub fn spec_started(&mut self, descriptor: &SpecDescriptor) -> InformeResult<()> {
        self.expect_running("specStarted")?;
        descriptor.validate()?;
        if self
            .open_specs
            .insert(descriptor.id.clone(), self.clock.now_ms())
            .is_some()
        {
            return Err(InformeError::protocol(format!(
                "specStarted twice for {}",
                descriptor.id
            )));
        }
        Ok(())
    }

    /// Complete a spec: compute its duration, classify its status, update
    /// counters and attach it to the current suite
    ///
    /// A spec finishing with no suite open is an orphan: it still counts
    /// toward the run totals but is not retained in the tree.
    pub fn spec_done(&mut self, descriptor: &SpecDescriptor) -> InformeResult<()> {
        self.expect_running("specDone")?;
        descriptor.validate()?;
        let Some(start_ms) = self.open_specs.remove(&descriptor.id) else {
            return Err(InformeError::protocol(format!(
                "specDone for {} without specStarted",
                descriptor.id
            )));
        };
        let Some(status) = descriptor.status else {
            return Err(InformeError::invalid_descriptor(format!(
                "specDone for {} carries no status",
                descriptor.id
            )));
        };

        let node = SpecNode {
            id: descriptor.id.clone(),
            full_name: descriptor.full_name.clone(),
            description: descriptor.description.clone(),
            status,
            start_ms,
            duration_secs: elapsed_secs(start_ms, self.clock.now_ms()),
            failed_expectations: descriptor.failed_expectations.clone(),
        };

        self.results.totals.record(status);
        match self.open_suites.last_mut() {
            Some(suite) => {
                suite.counters.record(status);
                suite.specs.push(node);
            }
            None => {
                tracing::warn!(
                    spec = %descriptor.full_name,
                    "spec finished outside any suite; counted in totals only"
                );
            }
        }
        Ok(())
    }

    /// Finish the run and freeze the tree
    ///
    /// Suites or specs still open at this point are unbalanced pairs and
    /// rejected as a protocol violation.
    pub fn run_done(&mut self) -> InformeResult<()> {
        self.expect_running("runDone")?;
        if let Some(open) = self.open_suites.last() {
            return Err(InformeError::protocol(format!(
                "runDone with suite {} still open",
                open.id
            )));
        }
        if !self.open_specs.is_empty() {
            return Err(InformeError::protocol(format!(
                "runDone with {} spec(s) still open",
                self.open_specs.len()
            )));
        }
        self.results.totals.duration_secs =
            elapsed_secs(self.results.totals.started_ms, self.clock.now_ms());
        self.state = RunState::Done;
        Ok(())
    }

    fn expect_running(&self, operation: &str) -> InformeResult<()> {
        match self.state {
            RunState::Running => Ok(()),
            RunState::Idle => Err(InformeError::protocol(format!(
                "{operation} before runStarted"
            ))),
            RunState::Done => Err(InformeError::protocol(format!(
                "{operation} after runDone"
            ))),
        }
    }
}

/// Elapsed wall time between two epoch-millisecond stamps, in seconds
fn elapsed_secs(start_ms: u64, end_ms: u64) -> f64 {
    end_ms.saturating_sub(start_ms) as f64 / 1000.0
}
