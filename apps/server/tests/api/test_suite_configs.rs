//! Test suite configuration endpoint tests.

use serde_json::json;
use uuid::Uuid;

use super::helpers::*;

fn playwright_config() -> serde_json::Value {
    json!({
        "test_framework": "playwright",
        "programming_language": "typescript",
        "test_runner": "npx playwright test",
        "environment_variables": { "BASE_URL": "https://staging.example.com" },
        "pre_test_scripts": ["npm ci"],
        "retry_count": 2,
        "parallel_execution": true
    })
}

#[actix_rt::test]
async fn test_config_create_get_update() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "E2E", None).await;
    let uri = format!("/api/v1/test-suites/{suite}/config");

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, 404);

    let (status, created) = post(&app, &uri, playwright_config()).await;
    assert_eq!(status, 201, "{:?}", created);
    assert_eq!(created["timeout"], 300);
    assert_eq!(created["retry_count"], 2);
    assert_eq!(created["parallel_execution"], true);
    assert_eq!(
        created["environment_variables"]["BASE_URL"],
        "https://staging.example.com"
    );
    assert_eq!(created["post_test_scripts"], json!([]));

    let (status, updated) = put(
        &app,
        &uri,
        json!({
            "test_framework": "cypress",
            "programming_language": "javascript",
            "test_runner": "npx cypress run",
            "timeout": 600
        }),
    )
    .await;
    assert_eq!(status, 200, "{:?}", updated);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["test_framework"], "cypress");
    assert_eq!(updated["timeout"], 600);
    // omitted fields return to defaults
    assert_eq!(updated["retry_count"], 0);
    assert_eq!(updated["parallel_execution"], false);
    assert_eq!(updated["environment_variables"], json!({}));

    let (status, fetched) = get(&app, &uri).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["test_runner"], "npx cypress run");
}

#[actix_rt::test]
async fn test_duplicate_config_is_rejected_and_original_kept() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "E2E", None).await;
    let uri = format!("/api/v1/test-suites/{suite}/config");

    let (status, _) = post(&app, &uri, playwright_config()).await;
    assert_eq!(status, 201);

    let mut second = playwright_config();
    second["test_framework"] = json!("jest");
    let (status, body) = post(&app, &uri, second).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(
        body["error"],
        "Configuration already exists for this test suite"
    );

    let (_, fetched) = get(&app, &uri).await;
    assert_eq!(fetched["test_framework"], "playwright");
}

#[actix_rt::test]
async fn test_config_validation_and_missing_rows() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "E2E", None).await;
    let uri = format!("/api/v1/test-suites/{suite}/config");

    let (status, _) = post(
        &app,
        &uri,
        json!({ "test_framework": "playwright", "programming_language": "typescript" }),
    )
    .await;
    assert_eq!(status, 400);

    let mut bad_timeout = playwright_config();
    bad_timeout["timeout"] = json!(0);
    let (status, _) = post(&app, &uri, bad_timeout).await;
    assert_eq!(status, 400);

    let (status, _) = put(&app, &uri, playwright_config()).await;
    assert_eq!(status, 404);

    let (status, _) = post(
        &app,
        &format!("/api/v1/test-suites/{}/config", Uuid::now_v7()),
        playwright_config(),
    )
    .await;
    assert_eq!(status, 404);
}
