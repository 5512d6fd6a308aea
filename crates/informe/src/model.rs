//! Result-tree model: lifecycle event payloads and the aggregated tree.
//!
//! Descriptors are the wire shapes delivered by a test-execution driver
//! (suite-started/done, spec-started/done). Nodes are what the collector
//! builds out of them: an ownership tree of suites and specs with timing
//! and counters at every level.

use crate::result::{InformeError, InformeResult};
use serde::{Deserialize, Serialize};

/// Terminal status of a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    /// Spec passed
    Passed,
    /// Spec failed
    Failed,
    /// Spec was pending (skipped)
    Pending,
}

impl SpecStatus {
    /// Check if status is passed
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Check if status is failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// Check if status is pending
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A single failed expectation attached to a failed spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedExpectation {
    /// Assertion message
    pub message: String,
    /// Stack trace, when the driver captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl FailedExpectation {
    /// Create an expectation with a message only
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack trace
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Failure body text: the stack when present, else the message
    #[must_use]
    pub fn body(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

/// Payload of a suite-started / suite-done event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteDescriptor {
    /// Driver-assigned identifier; pairs started/done events
    pub id: String,
    /// Full hierarchical name
    pub full_name: String,
    /// Display name of this suite alone
    #[serde(default)]
    pub description: String,
}

impl SuiteDescriptor {
    /// Create a descriptor
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            description: description.into(),
        }
    }

    /// Validate required fields at the collector boundary
    pub fn validate(&self) -> InformeResult<()> {
        if self.id.is_empty() {
            return Err(InformeError::invalid_descriptor("suite id is empty"));
        }
        if self.full_name.is_empty() {
            return Err(InformeError::invalid_descriptor(format!(
                "suite {} has an empty fullName",
                self.id
            )));
        }
        Ok(())
    }
}

/// Payload of a spec-started / spec-done event
///
/// `status` is absent on spec-started and required on spec-done;
/// `failed_expectations` is meaningful only for failed specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecDescriptor {
    /// Driver-assigned identifier; pairs started/done events
    pub id: String,
    /// Full hierarchical name (suite path plus description)
    pub full_name: String,
    /// Display name of the spec alone
    #[serde(default)]
    pub description: String,
    /// Terminal status; only present on spec-done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SpecStatus>,
    /// Failed expectations; only meaningful when status is failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_expectations: Vec<FailedExpectation>,
}

impl SpecDescriptor {
    /// Create a descriptor without a status (the spec-started shape)
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            description: description.into(),
            status: None,
            failed_expectations: Vec::new(),
        }
    }

    /// Set the terminal status (the spec-done shape)
    #[must_use]
    pub fn with_status(mut self, status: SpecStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Append a failed expectation
    #[must_use]
    pub fn with_failure(mut self, expectation: FailedExpectation) -> Self {
        self.failed_expectations.push(expectation);
        self
    }

    /// Validate required fields at the collector boundary
    pub fn validate(&self) -> InformeResult<()> {
        if self.id.is_empty() {
            return Err(InformeError::invalid_descriptor("spec id is empty"));
        }
        if self.full_name.is_empty() {
            return Err(InformeError::invalid_descriptor(format!(
                "spec {} has an empty fullName",
                self.id
            )));
        }
        Ok(())
    }
}

/// A lifecycle notification from the test-execution driver
///
/// This is the JSON wire shape the CLI consumes, tagged by an `event`
/// field: `{"event":"specDone","id":"s1",...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LifecycleEvent {
    /// The run began
    RunStarted,
    /// A suite opened
    SuiteStarted(SuiteDescriptor),
    /// The most recently opened suite finished
    SuiteDone(SuiteDescriptor),
    /// A spec began executing
    SpecStarted(SpecDescriptor),
    /// A spec finished with a terminal status
    SpecDone(SpecDescriptor),
    /// The run finished
    RunDone,
}

/// Direct-children counters of a suite
///
/// Counts only specs attached directly to the suite, not its subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteCounters {
    /// Specs completed directly under this suite
    pub tests: usize,
    /// Of those, passed
    pub passed: usize,
    /// Of those, failed
    pub failed: usize,
    /// Of those, pending
    pub pending: usize,
}

impl SuiteCounters {
    /// Record one completed spec
    pub fn record(&mut self, status: SpecStatus) {
        self.tests += 1;
        match status {
            SpecStatus::Passed => self.passed += 1,
            SpecStatus::Failed => self.failed += 1,
            SpecStatus::Pending => self.pending += 1,
        }
    }
}

/// A completed spec in the result tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecNode {
    /// Driver-assigned identifier
    pub id: String,
    /// Full hierarchical name
    pub full_name: String,
    /// Display name
    pub description: String,
    /// Terminal status
    pub status: SpecStatus,
    /// Start time, milliseconds since the Unix epoch
    pub start_ms: u64,
    /// Wall time in seconds
    pub duration_secs: f64,
    /// Failed expectations (non-empty only for failed specs)
    pub failed_expectations: Vec<FailedExpectation>,
}

/// A completed suite in the result tree
///
/// Children are owned by `specs` and `suites`; both keep insertion order.
/// There is no parent pointer: navigation while building happens on the
/// collector's open-suite stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuiteNode {
    /// Driver-assigned identifier
    pub id: String,
    /// Full hierarchical name
    pub full_name: String,
    /// Display name
    pub description: String,
    /// Start time, milliseconds since the Unix epoch
    pub start_ms: u64,
    /// Wall time in seconds, computed at suite-done
    pub duration_secs: f64,
    /// Specs completed directly under this suite
    pub specs: Vec<SpecNode>,
    /// Nested suites, in start order
    pub suites: Vec<SuiteNode>,
    /// Direct-children counters
    pub counters: SuiteCounters,
}

impl SuiteNode {
    /// Create an open suite node from its started event
    #[must_use]
    pub fn started(descriptor: &SuiteDescriptor, start_ms: u64) -> Self {
        Self {
            id: descriptor.id.clone(),
            full_name: descriptor.full_name.clone(),
            description: descriptor.description.clone(),
            start_ms,
            duration_secs: 0.0,
            specs: Vec::new(),
            suites: Vec::new(),
            counters: SuiteCounters::default(),
        }
    }
}

/// Flat totals across the whole run, every spec at any depth
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunTotals {
    /// Run start, milliseconds since the Unix epoch
    pub started_ms: u64,
    /// Total run wall time in seconds
    pub duration_secs: f64,
    /// Every completed spec, including orphans
    pub tests: usize,
    /// Of those, passed
    pub passed: usize,
    /// Of those, failed
    pub failed: usize,
    /// Of those, pending
    pub pending: usize,
}

impl RunTotals {
    /// Record one completed spec
    pub fn record(&mut self, status: SpecStatus) {
        self.tests += 1;
        match status {
            SpecStatus::Passed => self.passed += 1,
            SpecStatus::Failed => self.failed += 1,
            SpecStatus::Pending => self.pending += 1,
        }
    }
}

/// The root aggregate: top-level suites plus run-wide totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunResults {
    /// Top-level suites in start order
    pub suites: Vec<SuiteNode>,
    /// Run-wide totals
    pub totals: RunTotals,
}

impl RunResults {
    /// Check whether no spec failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.totals.failed == 0
    }
}
