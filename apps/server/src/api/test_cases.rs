//! Test case API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{DeleteResponse, TestCaseRequest, TestCaseResponse};

/// List the test cases of a suite.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/{id}/test-cases",
    tag = "Test Cases",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    responses(
        (status = 200, description = "Test cases, newest first", body = Vec<TestCaseResponse>),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_test_cases(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    pool.get_test_suite_by_id(suite_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

    let cases: Vec<TestCaseResponse> = pool
        .list_test_cases(suite_id)
        .await?
        .into_iter()
        .map(TestCaseResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(cases))
}

/// Add a test case to a suite.
#[utoipa::path(
    post,
    path = "/api/v1/test-suites/{id}/test-cases",
    tag = "Test Cases",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    request_body = TestCaseRequest,
    responses(
        (status = 201, description = "Test case created", body = TestCaseResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_test_case(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestCaseRequest>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    let new = body.into_inner().validate()?;
    let case = pool.insert_test_case(suite_id, new).await?;

    info!(
        "Test case created: case_id={}, suite_id={}",
        case.id, suite_id
    );

    Ok(HttpResponse::Created().json(TestCaseResponse::from(case)))
}

/// Replace a test case.
#[utoipa::path(
    put,
    path = "/api/v1/test-cases/{id}",
    tag = "Test Cases",
    params(
        ("id" = Uuid, Path, description = "Test case UUID")
    ),
    request_body = TestCaseRequest,
    responses(
        (status = 200, description = "Test case updated", body = TestCaseResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_test_case(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestCaseRequest>,
) -> AppResult<HttpResponse> {
    let changes = body.into_inner().validate()?;
    let case = pool.update_test_case(path.into_inner(), changes).await?;

    info!("Test case updated: case_id={}", case.id);

    Ok(HttpResponse::Ok().json(TestCaseResponse::from(case)))
}

/// Delete a test case.
#[utoipa::path(
    delete,
    path = "/api/v1/test-cases/{id}",
    tag = "Test Cases",
    params(
        ("id" = Uuid, Path, description = "Test case UUID")
    ),
    responses(
        (status = 200, description = "Test case deleted", body = DeleteResponse),
        (status = 404, description = "Test case not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_test_case(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    pool.delete_test_case(id).await?;

    info!("Test case deleted: case_id={}", id);

    Ok(HttpResponse::Ok().json(DeleteResponse::ok()))
}

/// Configure test case routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-suites/{id}/test-cases")
            .route(web::get().to(list_test_cases))
            .route(web::post().to(create_test_case)),
    )
    .service(
        web::resource("/test-cases/{id}")
            .route(web::put().to(update_test_case))
            .route(web::delete().to(delete_test_case)),
    );
}
