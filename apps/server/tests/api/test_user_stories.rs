//! User story endpoint tests.

use serde_json::json;
use uuid::Uuid;

use super::helpers::*;

#[actix_rt::test]
async fn test_user_story_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Payments").await;

    let (status, story) = post(
        &app,
        "/api/v1/user-stories",
        json!({
            "project_id": project_id,
            "title": "Pay by card",
            "description": "As a shopper I can pay by card",
            "acceptance_criteria": "Card is charged once"
        }),
    )
    .await;
    assert_eq!(status, 201, "{:?}", story);
    assert_eq!(story["status"], "draft");
    let id = story["id"].as_str().unwrap();

    let (status, updated) = put(
        &app,
        "/api/v1/user-stories",
        json!({
            "id": id,
            "title": "Pay by card",
            "description": "As a shopper I can pay by card",
            "status": "approved"
        }),
    )
    .await;
    assert_eq!(status, 200, "{:?}", updated);
    assert_eq!(updated["status"], "approved");
    assert!(updated["acceptance_criteria"].is_null());

    let (status, list) = get(&app, &format!("/api/v1/user-stories?project_id={project_id}")).await;
    assert_eq!(status, 200);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = delete(&app, &format!("/api/v1/user-stories?id={id}")).await;
    assert_eq!(status, 200);

    let (_, list) = get(&app, &format!("/api/v1/user-stories?project_id={project_id}")).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_user_story_filter_scopes_by_project() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let a = create_project(&app, "A").await;
    let b = create_project(&app, "B").await;

    for (project, title) in [(&a, "one"), (&a, "two"), (&b, "three")] {
        let (status, _) = post(
            &app,
            "/api/v1/user-stories",
            json!({ "project_id": project, "title": title, "description": "d" }),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (_, all) = get(&app, "/api/v1/user-stories").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, only_a) = get(&app, &format!("/api/v1/user-stories?project_id={a}")).await;
    let titles: Vec<&str> = only_a
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["two", "one"]);

    let (status, none) = get(
        &app,
        &format!("/api/v1/user-stories?project_id={}", Uuid::now_v7()),
    )
    .await;
    assert_eq!(status, 200);
    assert!(none.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_user_story_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Payments").await;

    let (status, _) = post(
        &app,
        "/api/v1/user-stories",
        json!({ "project_id": project_id, "title": "No description" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = post(
        &app,
        "/api/v1/user-stories",
        json!({ "project_id": project_id, "title": "t", "description": "d", "status": "shipped" }),
    )
    .await;
    assert_eq!(status, 400, "{:?}", body);

    let (status, _) = post(
        &app,
        "/api/v1/user-stories",
        json!({ "project_id": Uuid::now_v7(), "title": "t", "description": "d" }),
    )
    .await;
    assert_eq!(status, 404);

    let (status, body) = delete(&app, "/api/v1/user-stories").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid input: User story ID is required");
}

#[actix_rt::test]
async fn test_user_story_unknown_id_is_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Payments").await;

    let (status, story) = post(
        &app,
        "/api/v1/user-stories",
        json!({ "project_id": project_id, "title": "Keep me", "description": "d" }),
    )
    .await;
    assert_eq!(status, 201, "{:?}", story);

    let missing = Uuid::now_v7();
    let (status, body) = put(
        &app,
        "/api/v1/user-stories",
        json!({ "id": missing, "title": "Ghost", "description": "d", "status": "approved" }),
    )
    .await;
    assert_eq!(status, 404, "{:?}", body);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = delete(&app, &format!("/api/v1/user-stories?id={missing}")).await;
    assert_eq!(status, 404, "{:?}", body);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, list) = get(&app, &format!("/api/v1/user-stories?project_id={project_id}")).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], story["id"]);
    assert_eq!(list[0]["title"], "Keep me");
    assert_eq!(list[0]["status"], "draft");
}
