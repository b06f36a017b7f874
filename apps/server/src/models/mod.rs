//! Domain models and DTOs for the test management API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod project;
pub mod test_case;
pub mod test_run;
pub mod test_suite;
pub mod test_suite_config;
pub mod user_story;

// Re-export commonly used types
pub use project::{CreateProjectRequest, NewProject, ProjectChanges, ProjectResponse, UpdateProjectRequest};
pub use test_case::{NewTestCase, TestCaseRequest, TestCaseResponse};
pub use test_run::{
    CaseResult, CaseRunStatus, CaseStatusTally, CreateRunRequest, NewRun,
    RecordCaseResultRequest, RunStatus, TestCaseRunDetail, TestCaseRunResponse,
    TestSuiteRunResponse,
};
pub use test_suite::{
    CreateTestSuiteRequest, NewTestSuite, TestSuiteChanges, TestSuiteResponse,
    UpdateTestSuiteRequest,
};
pub use test_suite_config::{TestSuiteConfigInput, TestSuiteConfigRequest, TestSuiteConfigResponse};
pub use user_story::{
    CreateUserStoryRequest, NewUserStory, UpdateUserStoryRequest, UserStoryChanges,
    UserStoryResponse, UserStoryStatus,
};

/// `?id=` query parameter used by body-addressed DELETE routes.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IdQuery {
    pub id: Option<Uuid>,
}

/// `?project_id=` filter for list routes.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProjectFilter {
    pub project_id: Option<Uuid>,
}

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Treat an absent or blank string as a missing required field.
pub(crate) fn require_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidInput(format!("{} is required", field))),
    }
}

/// Unwrap a required identifier.
pub(crate) fn require_id(value: Option<Uuid>, field: &str) -> AppResult<Uuid> {
    value.ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))
}
