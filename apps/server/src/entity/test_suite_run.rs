//! Test suite run entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "test_suite_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub test_suite_id: Uuid,
    pub environment: Option<String>,
    pub trigger_type: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub trigger_details: JsonValue,
    /// running, passed, failed, error
    pub status: String,
    pub started_at: DateTimeUtc,
    /// Stamped each time the run settles with no case run pending
    pub completed_at: Option<DateTimeUtc>,
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
    #[sea_orm(has_many = "super::test_case_run::Entity")]
    CaseRuns,
}

impl Related<super::test_suite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestSuite.def()
    }
}

impl Related<super::test_case_run::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
