//! Create test_suite_configs table.
//!
//! One configuration per suite. The API pre-checks for an existing row; the
//! unique index backs that check at the storage level.

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
                    .table(TestSuiteConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestSuiteConfig::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestSuiteConfig::TestSuiteId).uuid().not_null())
                    .col(ColumnDef::new(TestSuiteConfig::TestFramework).string().not_null())
                    .col(
                        ColumnDef::new(TestSuiteConfig::ProgrammingLanguage)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestSuiteConfig::TestRunner).string().not_null())
                    .col(
                        ColumnDef::new(TestSuiteConfig::EnvironmentVariables)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::PreTestScripts)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::PostTestScripts)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::Timeout)
                            .integer()
                            .not_null()
                            .default(300),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::RetryCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::ParallelExecution)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestSuiteConfig::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_suite_configs_test_suite_id")
                            .from(TestSuiteConfig::Table, TestSuiteConfig::TestSuiteId)
                            .to(TestSuite::Table, TestSuite::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_suite_configs_test_suite_id")
                    .table(TestSuiteConfig::Table)
                    .col(TestSuiteConfig::TestSuiteId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestSuiteConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestSuiteConfig {
    #[sea_orm(iden = "test_suite_configs")]
    Table,
    Id,
    TestSuiteId,
    TestFramework,
    ProgrammingLanguage,
    TestRunner,
    EnvironmentVariables,
    PreTestScripts,
    PostTestScripts,
    Timeout,
    RetryCount,
    ParallelExecution,
    CreatedAt,
    UpdatedAt,
}
