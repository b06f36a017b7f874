//! Run orchestration tests: creation, result recording and status settling.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use super::helpers::*;

/// Project, suite and `n` test cases.
async fn setup<S>(app: &S, n: usize) -> (String, Vec<String>)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let project_id = create_project(app, "Orchestration").await;
    let suite = create_suite(app, &project_id, "Regression", None).await;
    let mut cases = Vec::with_capacity(n);
    for i in 0..n {
        cases.push(create_case(app, &suite, &format!("case {i}")).await);
    }
    (suite, cases)
}

#[actix_rt::test]
async fn test_create_run_starts_pending_cases() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 2).await;

    let (status, run) = post(
        &app,
        &format!("/api/v1/test-suites/{suite}/runs"),
        json!({
            "environment": "staging",
            "trigger_type": "ci",
            "trigger_details": { "branch": "main" },
            "test_cases": [cases[0], cases[1]]
        }),
    )
    .await;
    assert_eq!(status, 201, "{:?}", run);
    assert_eq!(run["status"], "running");
    assert!(run["completed_at"].is_null());
    assert_eq!(run["trigger_details"]["branch"], "main");
    let run_id = run["id"].as_str().unwrap();

    let (status, case_runs) =
        get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    assert_eq!(status, 200);
    let case_runs = case_runs.as_array().unwrap();
    assert_eq!(case_runs.len(), 2);
    for case_run in case_runs {
        assert_eq!(case_run["status"], "pending");
        assert!(case_run["completed_at"].is_null());
        assert!(case_run["name"].as_str().unwrap().starts_with("case "));
        assert_eq!(case_run["expected_results"], "page loads");
    }

    let (status, runs) = get(&app, &format!("/api/v1/test-suites/{suite}/runs")).await;
    assert_eq!(status, 200);
    assert_eq!(runs[0]["id"], run_id);
}

#[actix_rt::test]
async fn test_run_settles_once_all_cases_finish() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 2).await;
    let run_id = start_run(&app, &suite, &[cases[0].as_str(), cases[1].as_str()]).await;

    let (status, case_run) = record(&app, &run_id, &cases[0], "passed").await;
    assert_eq!(status, 200, "{:?}", case_run);
    assert_eq!(case_run["status"], "passed");
    assert_eq!(case_run["duration"], 1200);
    assert!(case_run["completed_at"].is_string());

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "running");
    assert!(run["completed_at"].is_null());

    let (status, _) = put(
        &app,
        &format!("/api/v1/test-suites/runs/{run_id}/test-cases"),
        json!({
            "test_case_id": cases[1],
            "status": "failed",
            "error_message": "expected 200, got 500"
        }),
    )
    .await;
    assert_eq!(status, 200);

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "failed");
    assert!(run["completed_at"].is_string());

    let (_, case_runs) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    let failed = case_runs
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["test_case_id"] == cases[1].as_str())
        .unwrap();
    assert_eq!(failed["error_message"], "expected 200, got 500");
}

#[actix_rt::test]
async fn test_final_status_priority() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 3).await;
    let all: Vec<&str> = cases.iter().map(String::as_str).collect();

    let scenarios = [
        (["error", "failed", "passed"], "error"),
        (["failed", "passed", "passed"], "failed"),
        (["passed", "passed", "passed"], "passed"),
        (["passed", "error", "passed"], "error"),
    ];

    for (results, expected) in scenarios {
        let run_id = start_run(&app, &suite, &all).await;
        for (case_id, result) in all.iter().zip(results) {
            let (status, _) = record(&app, &run_id, case_id, result).await;
            assert_eq!(status, 200);
        }
        let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
        assert_eq!(run["status"], expected, "results {:?}", results);
    }
}

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| panic!("not a timestamp: {:?}", value))
}

#[actix_rt::test]
async fn test_resettled_run_gets_fresh_completed_at() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 1).await;
    let run_id = start_run(&app, &suite, &[cases[0].as_str()]).await;

    record(&app, &run_id, &cases[0], "failed").await;
    let (_, settled) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(settled["status"], "failed");
    let first = timestamp(&settled["completed_at"]);

    actix_rt::time::sleep(Duration::from_millis(20)).await;

    // a retried case is re-recorded; the run settles again with a new stamp
    let (status, case_run) = record(&app, &run_id, &cases[0], "passed").await;
    assert_eq!(status, 200);
    assert!(case_run["completed_at"].is_string());

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "passed");
    let second = timestamp(&run["completed_at"]);
    assert!(second > first, "first={first} second={second}");

    // moving a case back to pending leaves the settled run untouched
    let (status, case_run) = record(&app, &run_id, &cases[0], "pending").await;
    assert_eq!(status, 200);
    assert!(case_run["completed_at"].is_string());

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "passed");
    assert_eq!(timestamp(&run["completed_at"]), second);
}

#[actix_rt::test]
async fn test_failed_case_run_insert_leaves_nothing_behind() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 1).await;
    let unknown = Uuid::now_v7().to_string();

    let (status, body) = post(
        &app,
        &format!("/api/v1/test-suites/{suite}/runs"),
        json!({ "test_cases": [cases[0], unknown] }),
    )
    .await;
    assert_eq!(status, 500, "{:?}", body);
    assert_eq!(body["code"], "DATABASE_ERROR");

    let (status, runs) = get(&app, &format!("/api/v1/test-suites/{suite}/runs")).await;
    assert_eq!(status, 200);
    assert!(runs.as_array().unwrap().is_empty());

    // the connection is usable again after the rollback
    let run_id = start_run(&app, &suite, &[cases[0].as_str()]).await;
    let (_, case_runs) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    assert_eq!(case_runs.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_run_input_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 1).await;
    let uri = format!("/api/v1/test-suites/{suite}/runs");

    let (status, _) = post(&app, &uri, json!({ "test_cases": [cases[0], cases[0]] })).await;
    assert_eq!(status, 400);

    let (status, _) = post(
        &app,
        &uri,
        json!({ "test_cases": [cases[0]], "trigger_details": "nightly" }),
    )
    .await;
    assert_eq!(status, 400);

    // the legacy field name is accepted
    let (status, run) = post(&app, &uri, json!({ "test_case_ids": [cases[0]] })).await;
    assert_eq!(status, 201);
    let run_id = run["id"].as_str().unwrap();
    assert_eq!(run["trigger_details"], json!({}));

    let results_uri = format!("/api/v1/test-suites/runs/{run_id}/test-cases");
    let (status, _) = put(&app, &results_uri, json!({ "status": "passed" })).await;
    assert_eq!(status, 400);
    let (status, _) = put(&app, &results_uri, json!({ "test_case_id": cases[0] })).await;
    assert_eq!(status, 400);
    let (status, _) = put(
        &app,
        &results_uri,
        json!({ "test_case_id": cases[0], "status": "skipped" }),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_run_not_found_paths() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 2).await;
    let missing = Uuid::now_v7();

    let (status, _) = post(
        &app,
        &format!("/api/v1/test-suites/{missing}/runs"),
        json!({ "test_cases": [] }),
    )
    .await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/{missing}/runs")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/runs/{missing}")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/runs/{missing}/test-cases")).await;
    assert_eq!(status, 404);

    let (status, body) = record(&app, &missing.to_string(), &cases[0], "passed").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Test suite run not found");

    // case that exists but is not part of the run
    let run_id = start_run(&app, &suite, &[cases[0].as_str()]).await;
    let (status, body) = record(&app, &run_id, &cases[1], "passed").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Test case run not found");

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "running");
}

#[actix_rt::test]
async fn test_empty_run_stays_running() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, _) = setup(&app, 0).await;

    let run_id = start_run(&app, &suite, &[]).await;
    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "running");

    let (_, case_runs) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    assert!(case_runs.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_concurrent_results_settle_run_once() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (suite, cases) = setup(&app, 4).await;
    let all: Vec<&str> = cases.iter().map(String::as_str).collect();
    let run_id = start_run(&app, &suite, &all).await;

    let outcomes = ["passed", "passed", "failed", "passed"];
    let requests = all
        .iter()
        .zip(outcomes)
        .map(|(case_id, outcome)| record(&app, &run_id, case_id, outcome));
    for (status, body) in futures_util::future::join_all(requests).await {
        assert_eq!(status, 200, "{:?}", body);
    }

    let (_, run) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(run["status"], "failed");
    assert!(run["completed_at"].is_string());

    let (_, case_runs) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    assert!(
        case_runs
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["status"] != "pending")
    );
}
