//! Test suite and test case endpoint tests.

use serde_json::json;
use uuid::Uuid;

use super::helpers::*;

#[actix_rt::test]
async fn test_suite_hierarchy() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Mobile").await;

    let root = create_suite(&app, &project_id, "Login", None).await;
    let child = create_suite(&app, &project_id, "Login / SSO", Some(root.as_str())).await;

    let (status, body) = get(&app, &format!("/api/v1/test-suites/{child}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["parent_suite_id"], root.as_str());

    let (status, children) = get(&app, &format!("/api/v1/test-suites/{root}/children")).await;
    assert_eq!(status, 200);
    let children = children.as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"], child.as_str());

    let (status, suites) = get(&app, &format!("/api/v1/test-suites?project_id={project_id}")).await;
    assert_eq!(status, 200);
    assert_eq!(suites.as_array().unwrap().len(), 2);
    assert_eq!(suites[0]["id"], child.as_str());
}

#[actix_rt::test]
async fn test_parent_from_other_project_is_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let a = create_project(&app, "A").await;
    let b = create_project(&app, "B").await;
    let foreign_parent = create_suite(&app, &a, "Shared", None).await;

    let (status, body) = post(
        &app,
        "/api/v1/test-suites",
        json!({ "project_id": b, "name": "Nested", "parent_suite_id": foreign_parent }),
    )
    .await;
    assert_eq!(status, 400, "{:?}", body);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (_, suites) = get(&app, &format!("/api/v1/test-suites?project_id={b}")).await;
    assert!(suites.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_suite_validation_and_missing_rows() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let missing = Uuid::now_v7();

    let (status, body) = get(&app, "/api/v1/test-suites").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid input: Project ID is required");

    let (status, _) = post(&app, "/api/v1/test-suites", json!({ "project_id": project_id })).await;
    assert_eq!(status, 400);

    let (status, _) = post(
        &app,
        "/api/v1/test-suites",
        json!({ "project_id": missing, "name": "Orphan" }),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = post(
        &app,
        "/api/v1/test-suites",
        json!({ "project_id": project_id, "name": "Orphan", "parent_suite_id": missing }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = get(&app, &format!("/api/v1/test-suites/{missing}")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/{missing}/children")).await;
    assert_eq!(status, 404);
    let (status, _) = put(
        &app,
        &format!("/api/v1/test-suites/{missing}"),
        json!({ "name": "Renamed" }),
    )
    .await;
    assert_eq!(status, 404);
    let (status, _) = delete(&app, &format!("/api/v1/test-suites/{missing}")).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_suite_update_and_delete() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "Search", None).await;

    let (status, body) = put(
        &app,
        &format!("/api/v1/test-suites/{suite}"),
        json!({ "name": "Search v2", "details": "covers filters" }),
    )
    .await;
    assert_eq!(status, 200, "{:?}", body);
    assert_eq!(body["name"], "Search v2");
    assert_eq!(body["details"], "covers filters");
    assert_eq!(body["project_id"], project_id.as_str());

    let (status, body) = delete(&app, &format!("/api/v1/test-suites/{suite}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[actix_rt::test]
async fn test_case_crud() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "Cart", None).await;

    let first = create_case(&app, &suite, "Add item").await;
    let second = create_case(&app, &suite, "Remove item").await;

    let (status, cases) = get(&app, &format!("/api/v1/test-suites/{suite}/test-cases")).await;
    assert_eq!(status, 200);
    let ids: Vec<&str> = cases
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);

    let (status, updated) = put(
        &app,
        &format!("/api/v1/test-cases/{first}"),
        json!({ "name": "Add item to cart", "expected_results": "badge shows 1" }),
    )
    .await;
    assert_eq!(status, 200, "{:?}", updated);
    assert_eq!(updated["name"], "Add item to cart");
    assert!(updated["steps"].is_null());

    let (status, _) = delete(&app, &format!("/api/v1/test-cases/{second}")).await;
    assert_eq!(status, 200);
    let (status, _) = delete(&app, &format!("/api/v1/test-cases/{second}")).await;
    assert_eq!(status, 404);

    let (status, _) = post(
        &app,
        &format!("/api/v1/test-suites/{}/test-cases", Uuid::now_v7()),
        json!({ "name": "Lost" }),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = post(
        &app,
        &format!("/api/v1/test-suites/{suite}/test-cases"),
        json!({ "steps": "no name" }),
    )
    .await;
    assert_eq!(status, 400);
}
