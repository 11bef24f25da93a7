use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentAction {
    #[sea_orm(string_value = "AUTO_ASSIGN")]
    AutoAssign,
    #[sea_orm(string_value = "REASSIGN")]
    Reassign,
    #[sea_orm(string_value = "SAFE_REASSIGN")]
    SafeReassign,
}

/// Append-only audit of every reviewer assignment decision. Never updated
/// or deleted; the stats queries aggregate over it.
#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pull_request_id: String,
    pub assigned_user_id: String,
    pub action: AssignmentAction,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_request::Entity",
        from = "Column::PullRequestId",
        to = "super::pull_request::Column::PullRequestId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PullRequest,
}

impl ActiveModelBehavior for ActiveModel {}
