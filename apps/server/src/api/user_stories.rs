//! User story API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateUserStoryRequest, DeleteResponse, IdQuery, ProjectFilter, UpdateUserStoryRequest,
    UserStoryResponse,
};

/// List user stories, optionally for one project.
#[utoipa::path(
    get,
    path = "/api/v1/user-stories",
    tag = "User Stories",
    params(
        ("project_id" = Option<Uuid>, Query, description = "Restrict to one project")
    ),
    responses(
        (status = 200, description = "User stories, newest first", body = Vec<UserStoryResponse>),
    )
)]
pub async fn list_user_stories(
    pool: web::Data<DbPool>,
    query: web::Query<ProjectFilter>,
) -> AppResult<HttpResponse> {
    let stories: Vec<UserStoryResponse> = pool
        .list_user_stories(query.project_id)
        .await?
        .into_iter()
        .map(UserStoryResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(stories))
}

/// Create a user story.
#[utoipa::path(
    post,
    path = "/api/v1/user-stories",
    tag = "User Stories",
    request_body = CreateUserStoryRequest,
    responses(
        (status = 201, description = "User story created", body = UserStoryResponse),
        (status = 400, description = "Missing project_id, title or description", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_user_story(
    pool: web::Data<DbPool>,
    body: web::Json<CreateUserStoryRequest>,
) -> AppResult<HttpResponse> {
    let new = body.into_inner().validate()?;
    let story = pool.insert_user_story(new).await?;

    info!(
        "User story created: story_id={}, project_id={}",
        story.id, story.project_id
    );

    Ok(HttpResponse::Created().json(UserStoryResponse::from(story)))
}

/// Update a user story. The id is taken from the body.
#[utoipa::path(
    put,
    path = "/api/v1/user-stories",
    tag = "User Stories",
    request_body = UpdateUserStoryRequest,
    responses(
        (status = 200, description = "User story updated", body = UserStoryResponse),
        (status = 400, description = "Missing id, title or description", body = crate::error::ErrorResponse),
        (status = 404, description = "User story not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_user_story(
    pool: web::Data<DbPool>,
    body: web::Json<UpdateUserStoryRequest>,
) -> AppResult<HttpResponse> {
    let changes = body.into_inner().validate()?;
    let story = pool.update_user_story(changes).await?;

    info!(
        "User story updated: story_id={}, status={}",
        story.id, story.status
    );

    Ok(HttpResponse::Ok().json(UserStoryResponse::from(story)))
}

/// Delete a user story.
#[utoipa::path(
    delete,
    path = "/api/v1/user-stories",
    tag = "User Stories",
    params(
        ("id" = Uuid, Query, description = "User story UUID")
    ),
    responses(
        (status = 200, description = "User story deleted", body = DeleteResponse),
        (status = 400, description = "Missing id", body = crate::error::ErrorResponse),
        (status = 404, description = "User story not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_user_story(
    pool: web::Data<DbPool>,
    query: web::Query<IdQuery>,
) -> AppResult<HttpResponse> {
    let id = query
        .id
        .ok_or_else(|| AppError::InvalidInput("User story ID is required".to_string()))?;

    pool.delete_user_story(id).await?;

    info!("User story deleted: story_id={}", id);

    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure user story routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user-stories")
            .route(web::get().to(list_user_stories))
            .route(web::post().to(create_user_story))
            .route(web::put().to(update_user_story))
            .route(web::delete().to(delete_user_story)),
    );
}
