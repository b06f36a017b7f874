//! Database queries for user stories.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::user_story::{self, ActiveModel, Entity as UserStory};
use crate::error::{AppError, AppResult};
use crate::models::{NewUserStory, UserStoryChanges};

use super::{update_error, DbPool};

impl DbPool {
    /// Insert a new user story under an existing project.
    pub async fn insert_user_story(&self, new: NewUserStory) -> AppResult<user_story::Model> {
        self.get_project_by_id(new.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let now = Utc::now();

        let model = ActiveModel {
            id: Set(Uuid::now_v7()),
            project_id: Set(new.project_id),
            title: Set(new.title),
            description: Set(new.description),
            acceptance_criteria: Set(new.acceptance_criteria),
            business_rules: Set(new.business_rules),
            status: Set(new.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert user story: {}", e)))?;

        Ok(result)
    }

    /// Get a user story by ID.
    pub async fn get_user_story_by_id(&self, id: Uuid) -> AppResult<Option<user_story::Model>> {
        let result = UserStory::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get user story: {}", e)))?;

        Ok(result)
    }

    /// List user stories, optionally restricted to one project, newest first.
    pub async fn list_user_stories(
        &self,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<user_story::Model>> {
        let mut select = UserStory::find();

        if let Some(project_id) = project_id {
            select = select.filter(user_story::Column::ProjectId.eq(project_id));
        }

        let result = select
            .order_by_desc(user_story::Column::CreatedAt)
            .order_by_desc(user_story::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list user stories: {}", e)))?;

        Ok(result)
    }

    /// Replace a user story's editable fields.
    pub async fn update_user_story(
        &self,
        changes: UserStoryChanges,
    ) -> AppResult<user_story::Model> {
        let story = self
            .get_user_story_by_id(changes.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User story".to_string()))?;

        let mut active: ActiveModel = story.into();
        active.title = Set(changes.title);
        active.description = Set(changes.description);
        active.acceptance_criteria = Set(changes.acceptance_criteria);
        active.business_rules = Set(changes.business_rules);
        active.status = Set(changes.status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let result = active
            .update(self.connection())
            .await
            .map_err(update_error("User story"))?;

        Ok(result)
    }

    /// Delete a user story.
    pub async fn delete_user_story(&self, id: Uuid) -> AppResult<()> {
        let result = UserStory::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete user story: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User story".to_string()));
        }

        Ok(())
    }
}
