//! Database queries for test suites.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::test_suite::{self, ActiveModel, Entity as TestSuite};
use crate::error::{AppError, AppResult};
use crate::models::{NewTestSuite, TestSuiteChanges};

use super::{update_error, DbPool};

impl DbPool {
    /// Insert a new test suite.
    ///
    /// The project must exist, and a parent suite, when given, must exist in
    /// the same project.
    pub async fn insert_test_suite(&self, new: NewTestSuite) -> AppResult<test_suite::Model> {
        self.get_project_by_id(new.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        if let Some(parent_id) = new.parent_suite_id {
            let parent = self.get_test_suite_by_id(parent_id).await?.ok_or_else(|| {
                AppError::InvalidInput(format!("Parent suite {} does not exist", parent_id))
            })?;
            if parent.project_id != new.project_id {
                return Err(AppError::InvalidInput(
                    "Parent suite must belong to the same project".to_string(),
                ));
            }
        }

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(new.project_id),
            parent_suite_id: Set(new.parent_suite_id),
            name: Set(new.name),
            details: Set(new.details),
            created_at: Set(Utc::now()),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert test suite: {}", e)))?;

        Ok(result)
    }

    /// Get a test suite by ID.
    pub async fn get_test_suite_by_id(&self, id: Uuid) -> AppResult<Option<test_suite::Model>> {
        let result = TestSuite::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test suite: {}", e)))?;

        Ok(result)
    }

    /// List the suites of a project, newest first.
    pub async fn list_test_suites(&self, project_id: Uuid) -> AppResult<Vec<test_suite::Model>> {
        let result = TestSuite::find()
            .filter(test_suite::Column::ProjectId.eq(project_id))
            .order_by_desc(test_suite::Column::CreatedAt)
            .order_by_desc(test_suite::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test suites: {}", e)))?;

        Ok(result)
    }

    /// List the direct children of a suite, newest first.
    pub async fn list_child_suites(&self, parent_id: Uuid) -> AppResult<Vec<test_suite::Model>> {
        let result = TestSuite::find()
            .filter(test_suite::Column::ParentSuiteId.eq(parent_id))
            .order_by_desc(test_suite::Column::CreatedAt)
            .order_by_desc(test_suite::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list child suites: {}", e)))?;

        Ok(result)
    }

    /// Replace a suite's name and details.
    pub async fn update_test_suite(
        &self,
        id: Uuid,
        changes: TestSuiteChanges,
    ) -> AppResult<test_suite::Model> {
        let suite = self
            .get_test_suite_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

        let mut active: ActiveModel = suite.into();
        active.name = Set(changes.name);
        active.details = Set(changes.details);

        let result = active
            .update(self.connection())
            .await
            .map_err(update_error("Test suite"))?;

        Ok(result)
    }

    /// Delete a suite together with its subtree, config, cases and runs.
    pub async fn delete_test_suite(&self, id: Uuid) -> AppResult<()> {
        let result = TestSuite::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete test suite: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Test suite".to_string()));
        }

        Ok(())
    }
}
