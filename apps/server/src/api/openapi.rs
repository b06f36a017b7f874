//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Test Management Server",
        version = "0.1.0",
        description = "API for organising projects, user stories and test suites, and for tracking test runs case by case"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Projects
        api::projects::list_projects,
        api::projects::get_project,
        api::projects::create_project,
        api::projects::update_project,
        api::projects::delete_project,
        // User stories
        api::user_stories::list_user_stories,
        api::user_stories::create_user_story,
        api::user_stories::update_user_story,
        api::user_stories::delete_user_story,
        // Test suites
        api::test_suites::list_test_suites,
        api::test_suites::create_test_suite,
        api::test_suites::get_test_suite,
        api::test_suites::update_test_suite,
        api::test_suites::delete_test_suite,
        api::test_suites::list_child_suites,
        // Suite configuration
        api::test_suite_configs::get_config,
        api::test_suite_configs::create_config,
        api::test_suite_configs::update_config,
        // Test cases
        api::test_cases::list_test_cases,
        api::test_cases::create_test_case,
        api::test_cases::update_test_case,
        api::test_cases::delete_test_case,
        // Test runs
        api::test_runs::list_runs,
        api::test_runs::create_run,
        api::test_runs::get_run,
        api::test_runs::list_case_runs,
        api::test_runs::record_case_result,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::DeleteResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Projects
            models::CreateProjectRequest,
            models::UpdateProjectRequest,
            models::ProjectResponse,
            // User stories
            models::UserStoryStatus,
            models::CreateUserStoryRequest,
            models::UpdateUserStoryRequest,
            models::UserStoryResponse,
            // Test suites
            models::CreateTestSuiteRequest,
            models::UpdateTestSuiteRequest,
            models::TestSuiteResponse,
            models::TestSuiteConfigRequest,
            models::TestSuiteConfigResponse,
            // Test cases
            models::TestCaseRequest,
            models::TestCaseResponse,
            // Test runs
            models::RunStatus,
            models::CaseRunStatus,
            models::CreateRunRequest,
            models::RecordCaseResultRequest,
            models::TestSuiteRunResponse,
            models::TestCaseRunResponse,
            models::TestCaseRunDetail,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Projects", description = "Project management"),
        (name = "User Stories", description = "User stories attached to projects"),
        (name = "Test Suites", description = "Hierarchical test suites"),
        (name = "Test Suite Configs", description = "Per-suite execution configuration"),
        (name = "Test Cases", description = "Test case definitions"),
        (name = "Test Runs", description = "Suite runs and per-case results")
    )
)]
pub struct ApiDoc;
