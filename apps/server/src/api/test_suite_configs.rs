//! Test suite configuration API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{TestSuiteConfigRequest, TestSuiteConfigResponse};

/// Get the configuration of a suite.
#[utoipa::path(
    get,
    path = "/api/v1/test-suites/{id}/config",
    tag = "Test Suite Configs",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    responses(
        (status = 200, description = "Configuration", body = TestSuiteConfigResponse),
        (status = 404, description = "No configuration for this suite", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_config(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let config = pool
        .get_suite_config(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Test suite configuration".to_string()))?;

    Ok(HttpResponse::Ok().json(TestSuiteConfigResponse::from(config)))
}

/// Create the configuration of a suite.
///
/// Fails if the suite already has one.
#[utoipa::path(
    post,
    path = "/api/v1/test-suites/{id}/config",
    tag = "Test Suite Configs",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    request_body = TestSuiteConfigRequest,
    responses(
        (status = 201, description = "Configuration created", body = TestSuiteConfigResponse),
        (status = 400, description = "Invalid input or configuration already exists", body = crate::error::ErrorResponse),
        (status = 404, description = "Suite not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_config(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestSuiteConfigRequest>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    let input = body.into_inner().validate()?;
    let config = pool.insert_suite_config(suite_id, input).await?;

    info!(
        "Test suite config created: suite_id={}, framework={}",
        suite_id, config.test_framework
    );

    Ok(HttpResponse::Created().json(TestSuiteConfigResponse::from(config)))
}

/// Replace the configuration of a suite.
#[utoipa::path(
    put,
    path = "/api/v1/test-suites/{id}/config",
    tag = "Test Suite Configs",
    params(
        ("id" = Uuid, Path, description = "Test suite UUID")
    ),
    request_body = TestSuiteConfigRequest,
    responses(
        (status = 200, description = "Configuration updated", body = TestSuiteConfigResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "No configuration for this suite", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_config(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<TestSuiteConfigRequest>,
) -> AppResult<HttpResponse> {
    let suite_id = path.into_inner();
    let input = body.into_inner().validate()?;
    let config = pool.update_suite_config(suite_id, input).await?;

    info!("Test suite config updated: suite_id={}", suite_id);

    Ok(HttpResponse::Ok().json(TestSuiteConfigResponse::from(config)))
}

/// Configure test suite configuration routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/test-suites/{id}/config")
            .route(web::get().to(get_config))
            .route(web::post().to(create_config))
            .route(web::put().to(update_config)),
    );
}
