//! Test suite configuration entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "test_suite_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub test_suite_id: Uuid,
    pub test_framework: String,
    pub programming_language: String,
    pub test_runner: String,
    /// JSON object of variable name to value
    #[sea_orm(column_type = "JsonBinary")]
    pub environment_variables: JsonValue,
    /// JSON array of commands, run in order
    #[sea_orm(column_type = "JsonBinary")]
    pub pre_test_scripts: JsonValue,
    #[sea_orm(column_type = "JsonBinary")]
    pub post_test_scripts: JsonValue,
    /// Seconds
    pub timeout: i32,
    pub retry_count: i32,
    pub parallel_execution: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::test_suite::Entity",
        from = "Column::TestSuiteId",
        to = "super::test_suite::Column::Id",
        on_delete = "Cascade"
    )]
    TestSuite,
}

impl Related<super::test_suite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestSuite.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
