//! Database queries for test suite runs and test case runs.
//!
//! Run creation and result recording each execute inside one transaction.
//! Early returns drop the transaction, which rolls it back, so a failed call
//! never leaves a partial run or a half-applied status change behind.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::test_case;
use crate::entity::test_case_run::{self, Entity as TestCaseRun};
use crate::entity::test_suite::Entity as TestSuite;
use crate::entity::test_suite_run::{self, Entity as TestSuiteRun};
use crate::error::{AppError, AppResult};
use crate::models::{CaseResult, CaseRunStatus, CaseStatusTally, NewRun, RunStatus};

use super::DbPool;

/// Roll back explicitly before reporting a lookup miss.
async fn rollback_not_found<T>(txn: DatabaseTransaction, what: &str) -> AppResult<T> {
    txn.rollback()
        .await
        .map_err(|e| AppError::Database(format!("Failed to roll back transaction: {}", e)))?;
    Err(AppError::NotFound(what.to_string()))
}

impl DbPool {
    /// Start a run of a suite with one pending case run per test case.
    pub async fn create_run(
        &self,
        test_suite_id: Uuid,
        new: NewRun,
    ) -> AppResult<test_suite_run::Model> {
        let txn = self.begin().await?;

        let suite = TestSuite::find_by_id(test_suite_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test suite: {}", e)))?;
        if suite.is_none() {
            return rollback_not_found(txn, "Test suite").await;
        }

        let now = Utc::now();

        let run = test_suite_run::ActiveModel {
            id: Set(Uuid::now_v7()),
            test_suite_id: Set(test_suite_id),
            environment: Set(new.environment),
            trigger_type: Set(new.trigger_type),
            trigger_details: Set(new.trigger_details),
            status: Set(RunStatus::Running.as_str().to_string()),
            started_at: Set(now),
            completed_at: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert test suite run: {}", e)))?;

        let case_count = new.test_case_ids.len();
        if case_count > 0 {
            let case_runs = new
                .test_case_ids
                .into_iter()
                .map(|test_case_id| test_case_run::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    test_suite_run_id: Set(run.id),
                    test_case_id: Set(test_case_id),
                    status: Set(CaseRunStatus::Pending.as_str().to_string()),
                    result: Set(None),
                    error_message: Set(None),
                    duration: Set(None),
                    started_at: Set(now),
                    completed_at: Set(None),
                });

            TestCaseRun::insert_many(case_runs)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to insert test case runs: {}", e)))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit test suite run: {}", e)))?;

        info!(
            "Test suite run created: run_id={}, test_suite_id={}, cases={}",
            run.id, test_suite_id, case_count
        );

        Ok(run)
    }

    /// Record one case result and settle the run once every case is terminal.
    ///
    /// The parent run row is locked for the whole transaction, so concurrent
    /// results for the same run recompute the aggregate one after another.
    pub async fn record_case_result(
        &self,
        run_id: Uuid,
        result: CaseResult,
    ) -> AppResult<test_case_run::Model> {
        let txn = self.begin().await?;

        let run = TestSuiteRun::find_by_id(run_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to lock test suite run: {}", e)))?;
        let Some(run) = run else {
            return rollback_not_found(txn, "Test suite run").await;
        };

        let case_run = TestCaseRun::find()
            .filter(test_case_run::Column::TestSuiteRunId.eq(run_id))
            .filter(test_case_run::Column::TestCaseId.eq(result.test_case_id))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test case run: {}", e)))?;
        let Some(case_run) = case_run else {
            return rollback_not_found(txn, "Test case run").await;
        };

        let now = Utc::now();

        let mut active: test_case_run::ActiveModel = case_run.into();
        active.status = Set(result.status.as_str().to_string());
        active.result = Set(result.result);
        active.error_message = Set(result.error_message);
        active.duration = Set(result.duration);
        // completed_at only moves forward; a pending update leaves it alone
        if result.status.is_terminal() {
            active.completed_at = Set(Some(now));
        }

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to update test case run: {}", e)))?;

        let statuses: Vec<String> = TestCaseRun::find()
            .select_only()
            .column(test_case_run::Column::Status)
            .filter(test_case_run::Column::TestSuiteRunId.eq(run_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to count test case runs: {}", e)))?;

        let tally = CaseStatusTally::from_stored(statuses.iter().map(String::as_str));

        if let Some(final_status) = tally.final_status() {
            // every settle stamps the run, including a re-settle after a retried case
            let mut run_active: test_suite_run::ActiveModel = run.into();
            run_active.status = Set(final_status.as_str().to_string());
            run_active.completed_at = Set(Some(now));
            run_active
                .update(&txn)
                .await
                .map_err(|e| AppError::Database(format!("Failed to settle test suite run: {}", e)))?;

            info!(
                "Test suite run settled: run_id={}, status={}, passed={}, failed={}, error={}",
                run_id, final_status, tally.passed, tally.failed, tally.error
            );
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit case result: {}", e)))?;

        Ok(updated)
    }

    /// Get a suite run by ID.
    pub async fn get_run_by_id(&self, id: Uuid) -> AppResult<Option<test_suite_run::Model>> {
        let result = TestSuiteRun::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get test suite run: {}", e)))?;

        Ok(result)
    }

    /// List the runs of a suite, newest first.
    pub async fn list_runs(&self, test_suite_id: Uuid) -> AppResult<Vec<test_suite_run::Model>> {
        let result = TestSuiteRun::find()
            .filter(test_suite_run::Column::TestSuiteId.eq(test_suite_id))
            .order_by_desc(test_suite_run::Column::StartedAt)
            .order_by_desc(test_suite_run::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test suite runs: {}", e)))?;

        Ok(result)
    }

    /// List the case runs of a run with their test case definitions, in start order.
    pub async fn list_case_runs(
        &self,
        run_id: Uuid,
    ) -> AppResult<Vec<(test_case_run::Model, Option<test_case::Model>)>> {
        let result = TestCaseRun::find()
            .find_also_related(test_case::Entity)
            .filter(test_case_run::Column::TestSuiteRunId.eq(run_id))
            .order_by_asc(test_case_run::Column::StartedAt)
            .order_by_asc(test_case_run::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list test case runs: {}", e)))?;

        Ok(result)
    }
}
