//! Test suite DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{require_id, require_text};
use crate::entity::test_suite;
use crate::error::AppResult;

/// Request body for creating a test suite.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTestSuiteRequest {
    pub project_id: Option<Uuid>,
    pub name: Option<String>,
    /// Parent suite; must belong to the same project.
    pub parent_suite_id: Option<Uuid>,
    pub details: Option<String>,
}

/// Request body for updating a test suite.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTestSuiteRequest {
    pub name: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewTestSuite {
    pub project_id: Uuid,
    pub name: String,
    pub parent_suite_id: Option<Uuid>,
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TestSuiteChanges {
    pub name: String,
    pub details: Option<String>,
}

impl CreateTestSuiteRequest {
    pub fn validate(self) -> AppResult<NewTestSuite> {
        Ok(NewTestSuite {
            project_id: require_id(self.project_id, "project_id")?,
            name: require_text(self.name, "name")?,
            parent_suite_id: self.parent_suite_id,
            details: self.details,
        })
    }
}

impl UpdateTestSuiteRequest {
    pub fn validate(self) -> AppResult<TestSuiteChanges> {
        Ok(TestSuiteChanges {
            name: require_text(self.name, "name")?,
            details: self.details,
        })
    }
}

/// Test suite as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestSuiteResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub parent_suite_id: Option<Uuid>,
    pub name: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<test_suite::Model> for TestSuiteResponse {
    fn from(m: test_suite::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            parent_suite_id: m.parent_suite_id,
            name: m.name,
            details: m.details,
            created_at: m.created_at,
        }
    }
}
