//! Database queries for test suite configurations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::test_suite_config::{self, ActiveModel, Entity as TestSuiteConfig};
use crate::error::{AppError, AppResult};
use crate::models::TestSuiteConfigInput;

use super::{update_error, DbPool};

impl DbPool {
    /// Get the configuration of a suite.
    pub async fn get_suite_config(
        &self,
        test_suite_id: Uuid,
    ) -> AppResult<Option<test_suite_config::Model>> {
        let result = TestSuiteConfig::find()
            .filter(test_suite_config::Column::TestSuiteId.eq(test_suite_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test suite config: {}", e)))?;

        Ok(result)
    }

    /// Create the configuration of a suite. A suite has at most one.
    pub async fn insert_suite_config(
        &self,
        test_suite_id: Uuid,
        input: TestSuiteConfigInput,
    ) -> AppResult<test_suite_config::Model> {
        self.get_test_suite_by_id(test_suite_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

        if self.get_suite_config(test_suite_id).await?.is_some() {
            return Err(AppError::Conflict(
                "Configuration already exists for this test suite".to_string(),
            ));
        }

        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            test_suite_id: Set(test_suite_id),
            environment_variables: Set(input.environment_variables_json()),
            pre_test_scripts: Set(input.pre_test_scripts_json()),
            post_test_scripts: Set(input.post_test_scripts_json()),
            test_framework: Set(input.test_framework),
            programming_language: Set(input.programming_language),
            test_runner: Set(input.test_runner),
            timeout: Set(input.timeout),
            retry_count: Set(input.retry_count),
            parallel_execution: Set(input.parallel_execution),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(self.connection()).await.map_err(|e| {
            AppError::Database(format!("Failed to insert test suite config: {}", e))
        })?;

        Ok(result)
    }

    /// Replace every field of a suite's configuration.
    pub async fn update_suite_config(
        &self,
        test_suite_id: Uuid,
        input: TestSuiteConfigInput,
    ) -> AppResult<test_suite_config::Model> {
        let config = self
            .get_suite_config(test_suite_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test suite configuration".to_string()))?;

        let mut active: ActiveModel = config.into();
        active.environment_variables = Set(input.environment_variables_json());
        active.pre_test_scripts = Set(input.pre_test_scripts_json());
        active.post_test_scripts = Set(input.post_test_scripts_json());
        active.test_framework = Set(input.test_framework);
        active.programming_language = Set(input.programming_language);
        active.test_runner = Set(input.test_runner);
        active.timeout = Set(input.timeout);
        active.retry_count = Set(input.retry_count);
        active.parallel_execution = Set(input.parallel_execution);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(update_error("Test suite configuration"))?;

        Ok(result)
    }
}
