//! SeaORM database migrations.
//!
//! Written with the schema builder so the same migrations run on PostgreSQL
//! and on the SQLite databases used by the test suite.

pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_projects;
mod m20260301_000002_create_user_stories;
mod m20260301_000003_create_test_suites;
mod m20260301_000004_create_test_suite_configs;
mod m20260301_000005_create_test_cases;
mod m20260301_000006_create_test_suite_runs;
mod m20260301_000007_create_test_case_runs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_projects::Migration),
            Box::new(m20260301_000002_create_user_stories::Migration),
            Box::new(m20260301_000003_create_test_suites::Migration),
            Box::new(m20260301_000004_create_test_suite_configs::Migration),
            Box::new(m20260301_000005_create_test_cases::Migration),
            Box::new(m20260301_000006_create_test_suite_runs::Migration),
            Box::new(m20260301_000007_create_test_case_runs::Migration),
        ]
    }
}
