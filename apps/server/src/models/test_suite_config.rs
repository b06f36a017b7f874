//! Test suite configuration DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use super::require_text;
use crate::entity::test_suite_config;
use crate::error::{AppError, AppResult};

/// Default per-suite timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: i32 = 300;

/// Request body for creating or replacing a suite configuration.
///
/// Omitted optional fields fall back to their defaults on both create and update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TestSuiteConfigRequest {
    pub test_framework: Option<String>,
    pub programming_language: Option<String>,
    pub test_runner: Option<String>,
    pub environment_variables: Option<BTreeMap<String, String>>,
    pub pre_test_scripts: Option<Vec<String>>,
    pub post_test_scripts: Option<Vec<String>>,
    /// Seconds (default 300).
    pub timeout: Option<i32>,
    /// Default 0.
    pub retry_count: Option<i32>,
    /// Default false.
    pub parallel_execution: Option<bool>,
}

/// Validated configuration with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSuiteConfigInput {
    pub test_framework: String,
    pub programming_language: String,
    pub test_runner: String,
    pub environment_variables: BTreeMap<String, String>,
    pub pre_test_scripts: Vec<String>,
    pub post_test_scripts: Vec<String>,
    pub timeout: i32,
    pub retry_count: i32,
    pub parallel_execution: bool,
}

impl TestSuiteConfigRequest {
    pub fn validate(self) -> AppResult<TestSuiteConfigInput> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout <= 0 {
            return Err(AppError::InvalidInput(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }

        let retry_count = self.retry_count.unwrap_or(0);
        if retry_count < 0 {
            return Err(AppError::InvalidInput(
                "retry_count must not be negative".to_string(),
            ));
        }

        Ok(TestSuiteConfigInput {
            test_framework: require_text(self.test_framework, "test_framework")?,
            programming_language: require_text(self.programming_language, "programming_language")?,
            test_runner: require_text(self.test_runner, "test_runner")?,
            environment_variables: self.environment_variables.unwrap_or_default(),
            pre_test_scripts: self.pre_test_scripts.unwrap_or_default(),
            post_test_scripts: self.post_test_scripts.unwrap_or_default(),
            timeout,
            retry_count,
            parallel_execution: self.parallel_execution.unwrap_or(false),
        })
    }
}

impl TestSuiteConfigInput {
    pub fn environment_variables_json(&self) -> JsonValue {
        serde_json::to_value(&self.environment_variables)
            .unwrap_or_else(|_| JsonValue::Object(Default::default()))
    }

    pub fn pre_test_scripts_json(&self) -> JsonValue {
        JsonValue::from(self.pre_test_scripts.clone())
    }

    pub fn post_test_scripts_json(&self) -> JsonValue {
        JsonValue::from(self.post_test_scripts.clone())
    }
}

/// Suite configuration as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestSuiteConfigResponse {
    pub id: Uuid,
    pub test_suite_id: Uuid,
    pub test_framework: String,
    pub programming_language: String,
    pub test_runner: String,
    pub environment_variables: BTreeMap<String, String>,
    pub pre_test_scripts: Vec<String>,
    pub post_test_scripts: Vec<String>,
    pub timeout: i32,
    pub retry_count: i32,
    pub parallel_execution: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<test_suite_config::Model> for TestSuiteConfigResponse {
    fn from(m: test_suite_config::Model) -> Self {
        Self {
            id: m.id,
            test_suite_id: m.test_suite_id,
            test_framework: m.test_framework,
            programming_language: m.programming_language,
            test_runner: m.test_runner,
            environment_variables: serde_json::from_value(m.environment_variables)
                .unwrap_or_default(),
            pre_test_scripts: serde_json::from_value(m.pre_test_scripts).unwrap_or_default(),
            post_test_scripts: serde_json::from_value(m.post_test_scripts).unwrap_or_default(),
            timeout: m.timeout,
            retry_count: m.retry_count,
            parallel_execution: m.parallel_execution,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
