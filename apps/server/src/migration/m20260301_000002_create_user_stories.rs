//! Create user_stories table.

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
                    .table(UserStory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserStory::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserStory::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(UserStory::Title).string().not_null())
                    .col(ColumnDef::new(UserStory::Description).text().not_null())
                    .col(ColumnDef::new(UserStory::AcceptanceCriteria).text())
                    .col(ColumnDef::new(UserStory::BusinessRules).text())
                    .col(
                        ColumnDef::new(UserStory::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(UserStory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserStory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_stories_project_id")
                            .from(UserStory::Table, UserStory::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_stories_project_id")
                    .table(UserStory::Table)
                    .col(UserStory::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserStory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserStory {
    #[sea_orm(iden = "user_stories")]
    Table,
    Id,
    ProjectId,
    Title,
    Description,
    AcceptanceCriteria,
    BusinessRules,
    Status,
    CreatedAt,
    UpdatedAt,
}
