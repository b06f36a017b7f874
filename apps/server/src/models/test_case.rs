//! Test case DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::require_text;
use crate::entity::test_case;
use crate::error::AppResult;

/// Request body for creating or updating a test case.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestCaseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_results: Option<String>,
}

/// Validated test case fields.
#[derive(Debug, Clone)]
pub struct NewTestCase {
    pub name: String,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_results: Option<String>,
}

impl TestCaseRequest {
    pub fn validate(self) -> AppResult<NewTestCase> {
        Ok(NewTestCase {
            name: require_text(self.name, "name")?,
            description: self.description,
            steps: self.steps,
            expected_results: self.expected_results,
        })
    }
}

/// Test case as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestCaseResponse {
    pub id: Uuid,
    pub test_suite_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub steps: Option<String>,
    pub expected_results: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<test_case::Model> for TestCaseResponse {
    fn from(m: test_case::Model) -> Self {
        Self {
            id: m.id,
            test_suite_id: m.test_suite_id,
            name: m.name,
            description: m.description,
            steps: m.steps,
            expected_results: m.expected_results,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
