//! Database queries for projects.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Entity as Project};
use crate::error::{AppError, AppResult};
use crate::models::{NewProject, ProjectChanges};

use super::{update_error, DbPool};

impl DbPool {
    /// Insert a new project.
    pub async fn insert_project(&self, new: NewProject) -> AppResult<project::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            description: Set(new.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert project: {}", e)))?;

        Ok(result)
    }

    /// Get a project by ID.
    pub async fn get_project_by_id(&self, id: Uuid) -> AppResult<Option<project::Model>> {
        let result = Project::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get project: {}", e)))?;

        Ok(result)
    }

    /// List all projects, newest first.
    pub async fn list_projects(&self) -> AppResult<Vec<project::Model>> {
        let result = Project::find()
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list projects: {}", e)))?;

        Ok(result)
    }

    /// Replace a project's editable fields.
    pub async fn update_project(&self, changes: ProjectChanges) -> AppResult<project::Model> {
        let project = self
            .get_project_by_id(changes.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let mut active: ActiveModel = project.into();
        active.name = Set(changes.name);
        active.description = Set(changes.description);
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(update_error("Project"))?;

        Ok(result)
    }

    /// Delete a project. Stories, suites and everything below them cascade.
    pub async fn delete_project(&self, id: Uuid) -> AppResult<()> {
        let result = Project::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete project: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }
}
