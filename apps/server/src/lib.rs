//! Test Management Server library.
//!
//! Provides the database layer, the run orchestration and the HTTP API
//! for projects, user stories, test suites, test cases and test runs.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
