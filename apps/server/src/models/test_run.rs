//! Test suite run and test case run models.
//!
//! A suite run starts as `running` with one `pending` case run per test case.
//! Case runs move to a terminal status as results arrive; once every case run
//! is terminal the suite run takes the aggregate status computed by
//! [`CaseStatusTally::final_status`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use super::require_id;
use crate::entity::{test_case, test_case_run, test_suite_run};
use crate::error::{AppError, AppResult};

/// Status of a test suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// At least one case run is still pending.
    Running,
    /// Every case run passed.
    Passed,
    /// At least one case run failed and none errored.
    Failed,
    /// At least one case run errored.
    Error,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single test case within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseRunStatus {
    Pending,
    Passed,
    Failed,
    Error,
}

impl CaseRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Passed, failed and error are terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for CaseRunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-status counts of the case runs belonging to one suite run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseStatusTally {
    pub pending: usize,
    pub passed: usize,
    pub failed: usize,
    pub error: usize,
}

impl CaseStatusTally {
    /// Count stored status strings. Unrecognised values count as pending so
    /// they can never complete a run.
    pub fn from_stored<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tally = Self::default();
        for status in statuses {
            tally.add(CaseRunStatus::parse(status).unwrap_or(CaseRunStatus::Pending));
        }
        tally
    }

    pub fn add(&mut self, status: CaseRunStatus) {
        match status {
            CaseRunStatus::Pending => self.pending += 1,
            CaseRunStatus::Passed => self.passed += 1,
            CaseRunStatus::Failed => self.failed += 1,
            CaseRunStatus::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.completed()
    }

    /// Number of case runs in a terminal status.
    pub fn completed(&self) -> usize {
        self.passed + self.failed + self.error
    }

    /// Aggregate run status, or `None` while any case run is still pending.
    ///
    /// Error outranks failed, failed outranks passed. A run without case runs
    /// never completes.
    pub fn final_status(&self) -> Option<RunStatus> {
        if self.total() == 0 || self.completed() != self.total() {
            return None;
        }
        if self.error > 0 {
            Some(RunStatus::Error)
        } else if self.failed > 0 {
            Some(RunStatus::Failed)
        } else {
            Some(RunStatus::Passed)
        }
    }
}

/// Request body for starting a suite run.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateRunRequest {
    pub environment: Option<String>,
    /// What started the run (e.g. manual, scheduled).
    pub trigger_type: Option<String>,
    /// Free-form JSON object describing the trigger.
    #[schema(value_type = Option<Object>)]
    pub trigger_details: Option<JsonValue>,
    /// Test cases to execute; one pending case run is created per id.
    #[serde(default, alias = "test_case_ids")]
    pub test_cases: Vec<Uuid>,
}

/// Validated run creation input.
#[derive(Debug, Clone)]
pub struct NewRun {
    pub environment: Option<String>,
    pub trigger_type: Option<String>,
    pub trigger_details: JsonValue,
    pub test_case_ids: Vec<Uuid>,
}

impl CreateRunRequest {
    pub fn validate(self) -> AppResult<NewRun> {
        let trigger_details = match self.trigger_details {
            None | Some(JsonValue::Null) => JsonValue::Object(Default::default()),
            Some(obj @ JsonValue::Object(_)) => obj,
            Some(_) => {
                return Err(AppError::InvalidInput(
                    "trigger_details must be a JSON object".to_string(),
                ));
            }
        };

        let mut seen = HashSet::with_capacity(self.test_cases.len());
        if let Some(dup) = self.test_cases.iter().find(|id| !seen.insert(**id)) {
            return Err(AppError::InvalidInput(format!(
                "Test case {} is listed more than once",
                dup
            )));
        }

        Ok(NewRun {
            environment: self.environment,
            trigger_type: self.trigger_type,
            trigger_details,
            test_case_ids: self.test_cases,
        })
    }
}

/// Request body for recording one test case result.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecordCaseResultRequest {
    pub test_case_id: Option<Uuid>,
    /// pending, passed, failed or error.
    pub status: Option<String>,
    pub result: Option<String>,
    pub error_message: Option<String>,
    /// Milliseconds.
    pub duration: Option<i64>,
}

/// Validated case result.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub test_case_id: Uuid,
    pub status: CaseRunStatus,
    pub result: Option<String>,
    pub error_message: Option<String>,
    pub duration: Option<i64>,
}

impl RecordCaseResultRequest {
    pub fn validate(self) -> AppResult<CaseResult> {
        let test_case_id = require_id(self.test_case_id, "test_case_id")?;
        let status = match self.status.as_deref() {
            None | Some("") => {
                return Err(AppError::InvalidInput("status is required".to_string()));
            }
            Some(s) => CaseRunStatus::parse(s).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown test case run status '{}'", s))
            })?,
        };

        if matches!(self.duration, Some(d) if d < 0) {
            return Err(AppError::InvalidInput(
                "duration must not be negative".to_string(),
            ));
        }

        Ok(CaseResult {
            test_case_id,
            status,
            result: self.result,
            error_message: self.error_message,
            duration: self.duration,
        })
    }
}

/// Suite run as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestSuiteRunResponse {
    pub id: Uuid,
    pub test_suite_id: Uuid,
    pub environment: Option<String>,
    pub trigger_type: Option<String>,
    #[schema(value_type = Object)]
    pub trigger_details: JsonValue,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<test_suite_run::Model> for TestSuiteRunResponse {
    fn from(m: test_suite_run::Model) -> Self {
        Self {
            id: m.id,
            test_suite_id: m.test_suite_id,
            environment: m.environment,
            trigger_type: m.trigger_type,
            trigger_details: m.trigger_details,
            status: m.status,
            started_at: m.started_at,
            completed_at: m.completed_at,
        }
    }
}

/// Case run as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestCaseRunResponse {
    pub id: Uuid,
    pub test_suite_run_id: Uuid,
    pub test_case_id: Uuid,
    pub status: String,
    pub result: Option<String>,
    pub error_message: Option<String>,
    pub duration: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<test_case_run::Model> for TestCaseRunResponse {
    fn from(m: test_case_run::Model) -> Self {
        Self {
            id: m.id,
            test_suite_run_id: m.test_suite_run_id,
            test_case_id: m.test_case_id,
            status: m.status,
            result: m.result,
            error_message: m.error_message,
            duration: m.duration,
            started_at: m.started_at,
            completed_at: m.completed_at,
        }
    }
}

/// Case run joined with its test case definition.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestCaseRunDetail {
    pub id: Uuid,
    pub test_suite_run_id: Uuid,
    pub test_case_id: Uuid,
    pub status: String,
    pub result: Option<String>,
    pub error_message: Option<String>,
    pub duration: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_results: Option<String>,
}

impl From<(test_case_run::Model, Option<test_case::Model>)> for TestCaseRunDetail {
    fn from((run, case): (test_case_run::Model, Option<test_case::Model>)) -> Self {
        let (name, description, steps, expected_results) = match case {
            Some(c) => (Some(c.name), c.description, c.steps, c.expected_results),
            None => (None, None, None, None),
        };
        Self {
            id: run.id,
            test_suite_run_id: run.test_suite_run_id,
            test_case_id: run.test_case_id,
            status: run.status,
            result: run.result,
            error_message: run.error_message,
            duration: run.duration,
            started_at: run.started_at,
            completed_at: run.completed_at,
            name,
            description,
            steps,
            expected_results,
        }
    }
}
