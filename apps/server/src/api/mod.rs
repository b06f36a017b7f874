//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod projects;
pub mod test_cases;
pub mod test_runs;
pub mod test_suite_configs;
pub mod test_suites;
pub mod user_stories;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Register every API route plus extractor error handlers.
///
/// Malformed bodies, queries and path ids are reported through `AppError`
/// so every failure carries the same `{error, code}` body.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .configure(configure_health_routes)
    .configure(projects::configure_routes)
    .configure(user_stories::configure_routes)
    // run routes share the /test-suites prefix and must precede /test-suites/{id}
    .configure(test_runs::configure_routes)
    .configure(test_suites::configure_routes)
    .configure(test_suite_configs::configure_routes)
    .configure(test_cases::configure_routes);
}
