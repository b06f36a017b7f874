//! Project API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProjectRequest, DeleteResponse, IdQuery, ProjectResponse, UpdateProjectRequest,
};

/// List all projects, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All projects", body = Vec<ProjectResponse>),
        (status = 500, description = "Internal error", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_projects(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let projects: Vec<ProjectResponse> = pool
        .list_projects()
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(projects))
}

/// Get a single project.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(
        ("id" = Uuid, Path, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_project(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let project = pool
        .get_project_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

    Ok(HttpResponse::Ok().json(ProjectResponse::from(project)))
}

/// Create a project.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_project(
    pool: web::Data<DbPool>,
    body: web::Json<CreateProjectRequest>,
) -> AppResult<HttpResponse> {
    let new = body.into_inner().validate()?;
    let project = pool.insert_project(new).await?;

    info!("Project created: project_id={}", project.id);

    Ok(HttpResponse::Created().json(ProjectResponse::from(project)))
}

/// Update a project. The id is taken from the body.
#[utoipa::path(
    put,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Missing id or name", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_project(
    pool: web::Data<DbPool>,
    body: web::Json<UpdateProjectRequest>,
) -> AppResult<HttpResponse> {
    let changes = body.into_inner().validate()?;
    let project = pool.update_project(changes).await?;

    info!("Project updated: project_id={}", project.id);

    Ok(HttpResponse::Ok().json(ProjectResponse::from(project)))
}

/// Delete a project and everything it owns.
#[utoipa::path(
    delete,
    path = "/api/v1/projects",
    tag = "Projects",
    params(
        ("id" = Uuid, Query, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Project deleted", body = DeleteResponse),
        (status = 400, description = "Missing id", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_project(
    pool: web::Data<DbPool>,
    query: web::Query<IdQuery>,
) -> AppResult<HttpResponse> {
    let id = query
        .id
        .ok_or_else(|| AppError::InvalidInput("Project ID is required".to_string()))?;

    pool.delete_project(id).await?;

    info!("Project deleted: project_id={}", id);

    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project))
            .route(web::put().to(update_project))
            .route(web::delete().to(delete_project)),
    )
    .service(web::resource("/projects/{id}").route(web::get().to(get_project)));
}
