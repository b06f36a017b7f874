//! Liveness and readiness routes used by the container health check and
//! load balancers. Neither route touches the test management tables.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::ErrorResponse;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    /// Crate version of the running server.
    version: &'static str,
    timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
}

/// Answers as long as the HTTP workers are up. Never checks the database.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server process is up", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Round-trips `SELECT 1` through the pool; 503 until that succeeds.
#[utoipa::path(
    get,
    path = "/api/v1/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = ReadyResponse),
        (status = 503, description = "Database unreachable", body = ErrorResponse)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>) -> HttpResponse {
    let conn = pool.connection();
    let select_one = Statement::from_string(conn.get_database_backend(), "SELECT 1".to_owned());

    if let Err(e) = conn.query_one_raw(select_one).await {
        tracing::warn!(error = %e, "database not reachable, reporting not ready");
        return HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Database connection failed".to_string(),
            code: "NOT_READY".to_string(),
        });
    }

    HttpResponse::Ok().json(ReadyResponse {
        status: "ready",
        database: "connected",
    })
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
