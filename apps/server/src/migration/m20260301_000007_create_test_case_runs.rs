//! Create test_case_runs table.
//!
//! A case appears at most once per run; (test_suite_run_id, test_case_id)
//! is how results are addressed.

use sea_orm_migration::prelude::*;

use super::m20260301_000005_create_test_cases::TestCase;
use super::m20260301_000006_create_test_suite_runs::TestSuiteRun;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCaseRun::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestCaseRun::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestCaseRun::TestSuiteRunId).uuid().not_null())
                    .col(ColumnDef::new(TestCaseRun::TestCaseId).uuid().not_null())
                    .col(
                        ColumnDef::new(TestCaseRun::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(TestCaseRun::Result).text())
                    .col(ColumnDef::new(TestCaseRun::ErrorMessage).text())
                    .col(ColumnDef::new(TestCaseRun::Duration).big_integer())
                    .col(
                        ColumnDef::new(TestCaseRun::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestCaseRun::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_case_runs_test_suite_run_id")
                            .from(TestCaseRun::Table, TestCaseRun::TestSuiteRunId)
                            .to(TestSuiteRun::Table, TestSuiteRun::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_case_runs_test_case_id")
                            .from(TestCaseRun::Table, TestCaseRun::TestCaseId)
                            .to(TestCase::Table, TestCase::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_runs_run_case")
                    .table(TestCaseRun::Table)
                    .col(TestCaseRun::TestSuiteRunId)
                    .col(TestCaseRun::TestCaseId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestCaseRun::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestCaseRun {
    #[sea_orm(iden = "test_case_runs")]
    Table,
    Id,
    TestSuiteRunId,
    TestCaseId,
    Status,
    Result,
    ErrorMessage,
    Duration,
    StartedAt,
    CompletedAt,
}
