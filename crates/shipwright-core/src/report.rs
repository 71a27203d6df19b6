//! Structured stage results
//!
//! Build, deploy and test invocations each produce a [`StageReport`] instead
//! of signalling only through the process exit status. The CLI turns the
//! report into an exit code at the boundary.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Succeeded,
    Skipped,
    Failed,
}

/// One recorded step of a stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of one build, deploy or test invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    /// `build`, `deploy` or `test`
    pub stage: String,
    /// What the stage acted on, e.g. `web (release)`
    pub subject: String,
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub exit_code: i32,

    #[serde(skip)]
    clock: Option<Instant>,
}

impl StageReport {
    /// Start a report; the duration is measured from now until [`finish`](Self::finish)
    pub fn begin(stage: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            subject: subject.into(),
            success: true,
            started_at: Utc::now(),
            duration_ms: 0,
            steps: Vec::new(),
            error: None,
            exit_code: 0,
            clock: Some(Instant::now()),
        }
    }

    pub fn succeeded(&mut self, name: impl Into<String>, detail: Option<String>) {
        self.push(name, StepStatus::Succeeded, detail);
    }

    pub fn skipped(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.push(name, StepStatus::Skipped, Some(reason.into()));
    }

    /// Record a failed step; the stage as a whole becomes unsuccessful
    pub fn failed(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.push(name, StepStatus::Failed, Some(detail.into()));
        self.success = false;
        if self.exit_code == 0 {
            self.exit_code = 1;
        }
    }

    /// Mark the stage aborted by `error` with the given exit code
    pub fn abort(&mut self, error: impl ToString, exit_code: i32) {
        self.success = false;
        self.error = Some(error.to_string());
        self.exit_code = if exit_code == 0 { 1 } else { exit_code };
    }

    /// Stop the clock
    pub fn finish(mut self) -> Self {
        if let Some(clock) = self.clock.take() {
            self.duration_ms = clock.elapsed().as_millis() as u64;
        }
        self
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| s.status == StepStatus::Failed)
    }

    fn push(&mut self, name: impl Into<String>, status: StepStatus, detail: Option<String>) {
        self.steps.push(StepRecord {
            name: name.into(),
            status,
            detail,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_success_path() {
        let mut report = StageReport::begin("build", "web (release)");
        report.succeeded("npm install", None);
        report.skipped("database", "no schema changes");
        let report = report.finish();

        assert!(report.success);
        assert_eq!(report.exit_code, 0);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn test_failed_step_marks_report() {
        let mut report = StageReport::begin("test", "unit all");
        report.failed("windows", "dotnet test exited with 1");
        report.succeeded("macos", None);

        assert!(!report.success);
        assert_eq!(report.exit_code, 1);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_abort_keeps_error_exit_code() {
        let mut report = StageReport::begin("deploy", "prod web");
        report.abort("Missing required configuration field: s3_bucket", 2);
        let json = serde_json::to_value(report.finish()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["exit_code"], 2);
        assert!(json.get("clock").is_none());
    }
}
