//! Shared test helpers for the API integration tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use serde_json::{Value, json};
use test_management_lib::api::configure_api;
use test_management_lib::config::DatabaseConfig;
use test_management_lib::db::DbPool;
use test_management_lib::middleware::RequestLogger;

/// Fresh, migrated in-memory database.
pub async fn create_test_pool() -> DbPool {
    let pool = DbPool::connect(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test app serving the API under /api/v1.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await
}

/// Send a request and return status plus JSON body (Null when empty).
pub async fn send<S>(app: &S, req: test::TestRequest) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::get().uri(uri)).await
}

pub async fn post<S>(app: &S, uri: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::post().uri(uri).set_json(body)).await
}

pub async fn put<S>(app: &S, uri: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::put().uri(uri).set_json(body)).await
}

pub async fn delete<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send(app, test::TestRequest::delete().uri(uri)).await
}

/// Create a project and return its id.
pub async fn create_project<S>(app: &S, name: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(app, "/api/v1/projects", json!({ "name": name })).await;
    assert_eq!(status, 201, "Project create failed: {:?}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Create a suite (optionally nested) and return its id.
pub async fn create_suite<S>(app: &S, project_id: &str, name: &str, parent: Option<&str>) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(
        app,
        "/api/v1/test-suites",
        json!({ "project_id": project_id, "name": name, "parent_suite_id": parent }),
    )
    .await;
    assert_eq!(status, 201, "Suite create failed: {:?}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Create a test case in a suite and return its id.
pub async fn create_case<S>(app: &S, suite_id: &str, name: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(
        app,
        &format!("/api/v1/test-suites/{suite_id}/test-cases"),
        json!({ "name": name, "steps": "1. open page", "expected_results": "page loads" }),
    )
    .await;
    assert_eq!(status, 201, "Test case create failed: {:?}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Start a run over the given cases and return its id.
pub async fn start_run<S>(app: &S, suite_id: &str, cases: &[&str]) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post(
        app,
        &format!("/api/v1/test-suites/{suite_id}/runs"),
        json!({ "environment": "staging", "trigger_type": "manual", "test_cases": cases }),
    )
    .await;
    assert_eq!(status, 201, "Run create failed: {:?}", body);
    body["id"].as_str().unwrap().to_string()
}

/// Report one case result.
pub async fn record<S>(app: &S, run_id: &str, case_id: &str, status: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    put(
        app,
        &format!("/api/v1/test-suites/runs/{run_id}/test-cases"),
        json!({ "test_case_id": case_id, "status": status, "duration": 1200 }),
    )
    .await
}
