//! Create test_suites table.
//!
//! Suites form a tree through the nullable, self-referencing parent_suite_id.
//! Deleting a parent removes its whole subtree.

use sea_orm_migration::prelude::*;

use super::m20260301_000001_create_projects::Project;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestSuite::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestSuite::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestSuite::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(TestSuite::ParentSuiteId).uuid())
                    .col(ColumnDef::new(TestSuite::Name).string().not_null())
                    .col(ColumnDef::new(TestSuite::Details).text())
                    .col(
                        ColumnDef::new(TestSuite::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_suites_project_id")
                            .from(TestSuite::Table, TestSuite::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_suites_parent_suite_id")
                            .from(TestSuite::Table, TestSuite::ParentSuiteId)
                            .to(TestSuite::Table, TestSuite::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_suites_project_id")
                    .table(TestSuite::Table)
                    .col(TestSuite::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_suites_parent_suite_id")
                    .table(TestSuite::Table)
                    .col(TestSuite::ParentSuiteId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestSuite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestSuite {
    #[sea_orm(iden = "test_suites")]
    Table,
    Id,
    ProjectId,
    ParentSuiteId,
    Name,
    Details,
    CreatedAt,
}
