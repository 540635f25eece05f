//! Sequential case runner and suite report.
//!
//! Cases run one at a time: they share one cart and one browser session, so
//! running them concurrently would let them interfere.

use crate::result::ShopResult;
use crate::scenarios::Suite;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// What to do after a failed case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Skip every remaining case after the first failure
    StopOnFirst,
    /// Run every case regardless of failures
    #[default]
    CollectAll,
}

/// Final state of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Case passed
    Passed,
    /// Case failed or panicked
    Failed,
    /// Case was not run
    Skipped,
}

/// Something the harness can run and report on
pub trait NamedCase {
    /// Stable case name
    fn name(&self) -> String;

    /// Surface exercised
    fn suite(&self) -> Suite;
}

/// Result of running a single case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case name
    pub name: String,
    /// Surface exercised
    pub suite: Suite,
    /// Final state
    pub status: CaseStatus,
    /// Wall time spent in the case
    pub duration_ms: u64,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaseResult {
    /// Create a passing result
    #[must_use]
    pub fn passed(case: &impl NamedCase, duration: Duration) -> Self {
        Self::new(case, CaseStatus::Passed, duration, None)
    }

    /// Create a failing result
    #[must_use]
    pub fn failed(case: &impl NamedCase, duration: Duration, error: impl Into<String>) -> Self {
        Self::new(case, CaseStatus::Failed, duration, Some(error.into()))
    }

    /// Create a skipped result
    #[must_use]
    pub fn skipped(case: &impl NamedCase) -> Self {
        Self::new(case, CaseStatus::Skipped, Duration::ZERO, None)
    }

    fn new(
        case: &impl NamedCase,
        status: CaseStatus,
        duration: Duration,
        error: Option<String>,
    ) -> Self {
        Self::named(case.name(), case.suite(), status, duration, error)
    }

    fn named(
        name: String,
        suite: Suite,
        status: CaseStatus,
        duration: Duration,
        error: Option<String>,
    ) -> Self {
        Self {
            name,
            suite,
            status,
            duration_ms: duration.as_millis() as u64,
            error,
        }
    }
}

/// Results of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// When the first case started
    pub started_at: DateTime<Utc>,
    /// When the last case finished
    pub finished_at: DateTime<Utc>,
    /// Case results in execution order
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    /// Start an empty report
    #[must_use]
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            results: Vec::new(),
        }
    }

    fn count(&self, status: CaseStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Count passed cases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.count(CaseStatus::Passed)
    }

    /// Count failed cases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(CaseStatus::Failed)
    }

    /// Count skipped cases
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(CaseStatus::Skipped)
    }

    /// Get total case count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// No case failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Get failed cases
    #[must_use]
    pub fn failures(&self) -> Vec<&CaseResult> {
        self.results
            .iter()
            .filter(|r| r.status == CaseStatus::Failed)
            .collect()
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> ShopResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON rendering to `path`
    pub fn write(&self, path: impl AsRef<Path>) -> ShopResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Run `cases` in order.
///
/// An error or panic fails only its own case. Under
/// [`FailureMode::StopOnFirst`] every case after the first failure is
/// reported as skipped. `on_result` sees each result as soon as it exists.
pub async fn run_cases<C, F, Fut>(
    cases: Vec<C>,
    mode: FailureMode,
    mut run: F,
    mut on_result: impl FnMut(&CaseResult),
) -> SuiteReport
where
    C: NamedCase,
    F: FnMut(C) -> Fut,
    Fut: Future<Output = ShopResult<()>>,
{
    let mut report = SuiteReport::start();
    let mut stopped = false;

    for case in cases {
        let result = if stopped {
            CaseResult::skipped(&case)
        } else {
            let name = case.name();
            let suite = case.suite();
            tracing::info!(case = %name, %suite, "case started");
            let start = Instant::now();
            let outcome = AssertUnwindSafe(run(case)).catch_unwind().await;
            let (status, error) = match outcome {
                Ok(Ok(())) => (CaseStatus::Passed, None),
                Ok(Err(e)) => (CaseStatus::Failed, Some(e.to_string())),
                Err(panic) => (CaseStatus::Failed, Some(panic_message(panic.as_ref()))),
            };
            let result = CaseResult::named(name, suite, status, start.elapsed(), error);
            if result.status == CaseStatus::Failed {
                tracing::warn!(case = %result.name, error = result.error.as_deref().unwrap_or(""), "case failed");
                stopped = mode == FailureMode::StopOnFirst;
            }
            result
        };
        on_result(&result);
        report.results.push(result);
    }

    report.finished_at = Utc::now();
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
