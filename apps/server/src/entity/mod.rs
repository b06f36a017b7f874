//! SeaORM entity definitions.

pub mod project;
pub mod test_case;
pub mod test_case_run;
pub mod test_suite;
pub mod test_suite_config;
pub mod test_suite_run;
pub mod user_story;
