//! Deleting an owner removes everything beneath it.

use serde_json::json;

use super::helpers::*;

#[actix_rt::test]
async fn test_project_delete_cascades() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Doomed").await;

    let (status, _) = post(
        &app,
        "/api/v1/user-stories",
        json!({ "project_id": project_id, "title": "t", "description": "d" }),
    )
    .await;
    assert_eq!(status, 201);

    let root = create_suite(&app, &project_id, "Root", None).await;
    let child = create_suite(&app, &project_id, "Child", Some(root.as_str())).await;
    let case = create_case(&app, &child, "Case").await;
    let run_id = start_run(&app, &child, &[case.as_str()]).await;

    let (status, _) = delete(&app, &format!("/api/v1/projects?id={project_id}")).await;
    assert_eq!(status, 200);

    let (_, stories) = get(&app, &format!("/api/v1/user-stories?project_id={project_id}")).await;
    assert!(stories.as_array().unwrap().is_empty());
    let (_, suites) = get(&app, &format!("/api/v1/test-suites?project_id={project_id}")).await;
    assert!(suites.as_array().unwrap().is_empty());
    let (status, _) = get(&app, &format!("/api/v1/test-suites/{child}")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_suite_delete_cascades_to_subtree_and_runs() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;

    let root = create_suite(&app, &project_id, "Root", None).await;
    let child = create_suite(&app, &project_id, "Child", Some(root.as_str())).await;
    let sibling = create_suite(&app, &project_id, "Sibling", None).await;
    let case = create_case(&app, &root, "Case").await;
    let run_id = start_run(&app, &root, &[case.as_str()]).await;

    let (status, _) = post(
        &app,
        &format!("/api/v1/test-suites/{root}/config"),
        json!({
            "test_framework": "jest",
            "programming_language": "typescript",
            "test_runner": "npx jest"
        }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, _) = delete(&app, &format!("/api/v1/test-suites/{root}")).await;
    assert_eq!(status, 200);

    let (status, _) = get(&app, &format!("/api/v1/test-suites/{child}")).await;
    assert_eq!(status, 404);
    let (status, _) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}")).await;
    assert_eq!(status, 404);
    let (status, _) = put(&app, &format!("/api/v1/test-cases/{case}"), json!({ "name": "x" })).await;
    assert_eq!(status, 404);

    let (_, suites) = get(&app, &format!("/api/v1/test-suites?project_id={project_id}")).await;
    let suites = suites.as_array().unwrap();
    assert_eq!(suites.len(), 1);
    assert_eq!(suites[0]["id"], sibling.as_str());
}

#[actix_rt::test]
async fn test_deleting_a_test_case_removes_its_case_runs() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let project_id = create_project(&app, "Web").await;
    let suite = create_suite(&app, &project_id, "Suite", None).await;
    let keep = create_case(&app, &suite, "Keep").await;
    let removed = create_case(&app, &suite, "Drop").await;
    let run_id = start_run(&app, &suite, &[keep.as_str(), removed.as_str()]).await;

    let (status, _) = delete(&app, &format!("/api/v1/test-cases/{removed}")).await;
    assert_eq!(status, 200);

    let (_, case_runs) = get(&app, &format!("/api/v1/test-suites/runs/{run_id}/test-cases")).await;
    let case_runs = case_runs.as_array().unwrap();
    assert_eq!(case_runs.len(), 1);
    assert_eq!(case_runs[0]["test_case_id"], keep.as_str());
}
