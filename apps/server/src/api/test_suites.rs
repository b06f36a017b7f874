//! Test suite API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateTestSuiteRequest, DeleteResponse, ProjectFilter, TestSuiteResponse,
    UpdateTestSuiteRequest,
};

/// List the suites of a project.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites",
    tag = "Test Suites",
    params(
        ("project_id" = Uuid, Query, description = "Project UUID")
    ),
    responses(
        (status = 200, description = "Suites, newest first", body = Vec<TestSuiteResponse>),
        (status = 400, description = "Missing project_id", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_test_suites(
    pool: web::Data<DbPool>,
    query: web::Query<ProjectFilter>,
) -> AppResult<HttpResponse> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::InvalidInput("Project ID is required".to_string()))?;

    let suites: Vec<TestSuiteResponse> = pool
        .list_test_suites(project_id)
        .await?
        .into_iter()
        .map(TestSuiteResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(suites))
}

/// Create a test suite, optionally nested under a parent suite.
#[utoipa::path(
    post,
    path = "/api/v1/test-suites",
    tag = "Test Suites",
    request_body = CreateTestSuiteRequest,
    responses(
        (status = 201, description = "Suite created", body = TestSuiteResponse),
        (status = 400, description = "Missing field or parent in another project", body = crate::error::ErrorResponse),
        (status = 404, description = "Project not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_test_suite(
    pool: web::Data<DbPool>,
    body: web::Json<CreateTestSuiteRequest>,
) -> AppResult<HttpResponse> {
    let new = body.into_inner().validate()?;
    let suite = pool.insert_test_suite(new).await?;

    info!(
        "Test suite created: suite_id={}, project_id={}, parent_suite_id={:?}",
        suite.id, suite.project_id, suite.parent_suite_id
    );

    Ok(HttpResponse::Created().json(TestSuiteResponse::from(suite)))
}

/// Get a single test suite.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/{id}",
    tag = "Test Suites",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    responses(
        (status = 200, description = "Suite", body = TestSuiteResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_test_suite(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let suite = pool
        .get_test_suite_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

    Ok(HttpResponse::Ok().json(TestSuiteResponse::from(suite)))
}

/// Update a suite's name and details.
#[utoipa::path(
    put,
    path = "/api/v1/test-suites/{id}",
    tag = "Test Suites",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    request_body = UpdateTestSuiteRequest,
    responses(
        (status = 200, description = "Suite updated", body = TestSuiteResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_test_suite(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTestSuiteRequest>,
) -> AppResult<HttpResponse> {
    let changes = body.into_inner().validate()?;
    let suite = pool.update_test_suite(path.into_inner(), changes).await?;

    info!("Test suite updated: suite_id={}", suite.id);

    Ok(HttpResponse::Ok().json(TestSuiteResponse::from(suite)))
}

/// Delete a suite and its subtree.
#[utoipa::path(
    delete,
    path = "/api/v1/test-suites/{id}",
    tag = "Test Suites",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    responses(
        (status = 200, description = "Suite deleted", body = DeleteResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_test_suite(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    pool.delete_test_suite(id).await?;

    info!("Test suite deleted: suite_id={}", id);

    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// List the direct children of a suite.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/{id}/children",
    tag = "Test Suites",
    params(
        ("id" = Uuid, Path, description = "Parent test suite UUID")
    ),
    responses(
        (status = 200, description = "Child suites, newest first", body = Vec<TestSuiteResponse>),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_child_suites(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    pool.get_test_suite_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

    let children: Vec<TestSuiteResponse> = pool
        .list_child_suites(id)
        .await?
        .into_iter()
        .map(TestSuiteResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(children))
}

/// Configure test suite routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-suites")
            .route(web::get().to(list_test_suites))
            .route(web::post().to(create_test_suite)),
    )
    .service(
        web::resource("/test-suites/{id}")
            .route(web::get().to(get_test_suite))
            .route(web::put().to(update_test_suite))
            .route(web::delete().to(delete_test_suite)),
    )
    .service(web::resource("/test-suites/{id}/children").route(web::get().to(list_child_suites)));
}
