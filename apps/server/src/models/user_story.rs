//! User story domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{require_id, require_text};
use crate::entity::user_story;
use crate::error::{AppError, AppResult};

/// Review lifecycle of a user story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStoryStatus {
    #[default]
    Draft,
    InReview,
    Approved,
    Validated,
    Rejected,
    OnHold,
}

impl UserStoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Validated => "validated",
            Self::Rejected => "rejected",
            Self::OnHold => "on_hold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "in_review" => Some(Self::InReview),
            "approved" => Some(Self::Approved),
            "validated" => Some(Self::Validated),
            "rejected" => Some(Self::Rejected),
            "on_hold" => Some(Self::OnHold),
            _ => None,
        }
    }

    /// Parse an optional status from a request, defaulting to draft.
    fn from_request(value: Option<String>) -> AppResult<Self> {
        match value.as_deref() {
            None | Some("") => Ok(Self::default()),
            Some(s) => Self::parse(s).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown user story status '{}'", s))
            }),
        }
    }
}

impl std::fmt::Display for UserStoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for creating a user story.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserStoryRequest {
    pub project_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub business_rules: Option<String>,
    /// Defaults to `draft`.
    pub status: Option<String>,
}

/// Request body for updating a user story. The id travels in the body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserStoryRequest {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub acceptance_criteria: Option<String>,
    pub business_rules: Option<String>,
    /// Defaults to `draft`.
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUserStory {
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub acceptance_criteria: Option<String>,
    pub business_rules: Option<String>,
    pub status: UserStoryStatus,
}

#[derive(Debug, Clone)]
pub struct UserStoryChanges {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub acceptance_criteria: Option<String>,
    pub business_rules: Option<String>,
    pub status: UserStoryStatus,
}

impl CreateUserStoryRequest {
    pub fn validate(self) -> AppResult<NewUserStory> {
        Ok(NewUserStory {
            project_id: require_id(self.project_id, "project_id")?,
            title: require_text(self.title, "title")?,
            description: require_text(self.description, "description")?,
            acceptance_criteria: self.acceptance_criteria,
            business_rules: self.business_rules,
            status: UserStoryStatus::from_request(self.status)?,
        })
    }
}

impl UpdateUserStoryRequest {
    pub fn validate(self) -> AppResult<UserStoryChanges> {
        Ok(UserStoryChanges {
            id: require_id(self.id, "id")?,
            title: require_text(self.title, "title")?,
            description: require_text(self.description, "description")?,
            acceptance_criteria: self.acceptance_criteria,
            business_rules: self.business_rules,
            status: UserStoryStatus::from_request(self.status)?,
        })
    }
}

/// User story as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStoryResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub acceptance_criteria: Option<String>,
    pub business_rules: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user_story::Model> for UserStoryResponse {
    fn from(m: user_story::Model) -> Self {
        Self {
            id: m.id,
            project_id: m.project_id,
            title: m.title,
            description: m.description,
            acceptance_criteria: m.acceptance_criteria,
            business_rules: m.business_rules,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
