//! Database queries for test case definitions.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::test_case::{self, ActiveModel, Entity as TestCase};
use crate::error::{AppError, AppResult};
use crate::models::NewTestCase;

use super::{update_error, DbPool};

impl DbPool {
    /// Insert a test case into an existing suite.
    pub async fn insert_test_case(
        &self,
        test_suite_id: Uuid,
        new: NewTestCase,
    ) -> AppResult<test_case::Model> {
        self.get_test_suite_by_id(test_suite_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            test_suite_id: Set(test_suite_id),
            name: Set(new.name),
            description: Set(new.description),
            steps: Set(new.steps),
            expected_results: Set(new.expected_results),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert test case: {}", e)))?;

        Ok(result)
    }

    /// Get a test case by ID.
    pub async fn get_test_case_by_id(&self, id: Uuid) -> AppResult<Option<test_case::Model>> {
        let result = TestCase::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test case: {}", e)))?;

        Ok(result)
    }

    /// List the test cases of a suite, newest first.
    pub async fn list_test_cases(&self, test_suite_id: Uuid) -> AppResult<Vec<test_case::Model>> {
        let result = TestCase::find()
            .filter(test_case::Column::TestSuiteId.eq(test_suite_id))
            .order_by_desc(test_case::Column::CreatedAt)
            .order_by_desc(test_case::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test cases: {}", e)))?;

        Ok(result)
    }

    /// Replace a test case's fields.
    pub async fn update_test_case(
        &self,
        id: Uuid,
        changes: NewTestCase,
    ) -> AppResult<test_case::Model> {
        let case = self
            .get_test_case_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test case".to_string()))?;

        let mut active: ActiveModel = case.into();
        active.name = Set(changes.name);
        active.description = Set(changes.description);
        active.steps = Set(changes.steps);
        active.expected_results = Set(changes.expected_results);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(update_error("Test case"))?;

        Ok(result)
    }

    /// Delete a test case along with its case runs.
    pub async fn delete_test_case(&self, id: Uuid) -> AppResult<()> {
        let result = TestCase::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete test case: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Test case".to_string()));
        }

        Ok(())
    }
}
