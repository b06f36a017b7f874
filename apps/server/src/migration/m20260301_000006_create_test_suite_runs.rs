//! Create test_suite_runs table.

use sea_orm_migration::prelude::*;

use super::m20260301_000003_create_test_suites::TestSuite;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestSuiteRun::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestSuiteRun::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestSuiteRun::TestSuiteId).uuid().not_null())
                    .col(ColumnDef::new(TestSuiteRun::Environment).string())
                    .col(ColumnDef::new(TestSuiteRun::TriggerType).string())
                    .col(
                        ColumnDef::new(TestSuiteRun::TriggerDetails)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteRun::Status)
                            .string_len(20)
                            .not_null()
                            .default("running"),
                    )
                    .col(
                        ColumnDef::new(TestSuiteRun::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestSuiteRun::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_suite_runs_test_suite_id")
                            .from(TestSuiteRun::Table, TestSuiteRun::TestSuiteId)
                            .to(TestSuite::Table, TestSuite::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_suite_runs_test_suite_id")
                    .table(TestSuiteRun::Table)
                    .col(TestSuiteRun::TestSuiteId)
                    .col(TestSuiteRun::StartedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestSuiteRun::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestSuiteRun {
    #[sea_orm(iden = "test_suite_runs")]
    Table,
    Id,
    TestSuiteId,
    Environment,
    TriggerType,
    TriggerDetails,
    Status,
    StartedAt,
    CompletedAt,
}
