//! Project DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{require_id, require_text};
use crate::entity::project;
use crate::error::AppResult;

/// Request body for creating a project.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Request body for updating a project. The id travels in the body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated project insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Validated full-row project update.
#[derive(Debug, Clone)]
pub struct ProjectChanges {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl CreateProjectRequest {
    pub fn validate(self) -> AppResult<NewProject> {
        Ok(NewProject {
            name: require_text(self.name, "name")?,
            description: self.description,
        })
    }
}

impl UpdateProjectRequest {
    pub fn validate(self) -> AppResult<ProjectChanges> {
        Ok(ProjectChanges {
            id: require_id(self.id, "id")?,
            name: require_text(self.name, "name")?,
            description: self.description,
        })
    }
}

/// Project as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectResponse {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
