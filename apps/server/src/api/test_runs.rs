//! Test run API handlers.
//!
//! A run is started against a suite with the test cases to execute. Results
//! are then reported one case at a time; the run settles to passed, failed
//! or error once no case is pending.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateRunRequest, RecordCaseResultRequest, TestCaseRunDetail, TestCaseRunResponse,
    TestSuiteRunResponse,
};

/// List the runs of a suite.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/{id}/runs",
    tag = "Test Runs",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    responses(
        (status = 200, description = "Runs, most recently started first", body = Vec<TestSuiteRunResponse>),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_runs(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    pool.get_test_suite_by_id(suite_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite".to_string()))?;

    let runs: Vec<TestSuiteRunResponse> = pool
        .list_runs(suite_id)
        .await?
        .into_iter()
        .map(TestSuiteRunResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(runs))
}

/// Start a run of a suite.
///
/// The run and one pending case run per listed test case are created
/// together; if any case run cannot be created nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/test-suites/{id}/runs",
    tag = "Test Runs",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    request_body = CreateRunRequest,
    responses(
        (status = 201, description = "Run started", body = TestSuiteRunResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
        (status = 500, description = "A case run could not be created", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_run(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<CreateRunRequest>,
) -> AppResult<HttpResponse> {
    let new = body.into_inner().validate()?;
    let run = pool.create_run(path.into_inner(), new).await?;

    Ok(HttpResponse::Created().json(TestSuiteRunResponse::from(run)))
}

/// Get a single run.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/runs/{id}",
    tag = "Test Runs",
    params(
        ("id" = Uuid, Path, description = "Test suite run UUID")
    ),
    responses(
        (status = 200, description = "Run", body = TestSuiteRunResponse),
        (status = 404, description = "Run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_run(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let run = pool
        .get_run_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite run".to_string()))?;

    Ok(HttpResponse::Ok().json(TestSuiteRunResponse::from(run)))
}

/// List the case runs of a run together with their test case definitions.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/runs/{id}/test-cases",
    tag = "Test Runs",
    params(
        ("id" = Uuid, Path, description = "Test suite run UUID")
    ),
    responses(
        (status = 200, description = "Case runs in start order", body = Vec<TestCaseRunDetail>),
        (status = 404, description = "Run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_case_runs(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();
    pool.get_run_by_id(run_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite run".to_string()))?;

    let case_runs: Vec<TestCaseRunDetail> = pool
        .list_case_runs(run_id)
        .await?
        .into_iter()
        .map(TestCaseRunDetail::from)
        .collect();

    Ok(HttpResponse::Ok().json(case_runs))
}

/// Record the result of one test case in a run.
#[utoipa::path(
    put,
    path = "/api/v1/test-suites/runs/{id}/test-cases",
    tag = "Test Runs",
    params(
        ("id" = Uuid, Path, description = "Test suite run UUID")
    ),
    request_body = RecordCaseResultRequest,
    responses(
        (status = 200, description = "Case run updated", body = TestCaseRunResponse),
        (status = 400, description = "Missing field or unknown status", body = crate::error::ErrorResponse),
        (status = 404, description = "Run or case run not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn record_case_result(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<RecordCaseResultRequest>,
) -> AppResult<HttpResponse> {
    let run_id = path.into_inner();
    let result = body.into_inner().validate()?;
    let test_case_id = result.test_case_id;
    let status = result.status;

    let case_run = pool.record_case_result(run_id, result).await?;

    info!(
        "Test case result recorded: run_id={}, test_case_id={}, status={}",
        run_id, test_case_id, status
    );

    Ok(HttpResponse::Ok().json(TestCaseRunResponse::from(case_run)))
}

/// Configure test run routes.
///
/// Must be registered before the `/test-suites/{id}` resources.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-suites/runs/{id}/test-cases")
            .route(web::get().to(list_case_runs))
            .route(web::put().to(record_case_result)),
    )
    .service(web::resource("/test-suites/runs/{id}").route(web::get().to(get_run)))
    .service(
        web::resource("/test-suites/{id}/runs")
            .route(web::get().to(list_runs))
            .route(web::post().to(create_run)),
    );
}
