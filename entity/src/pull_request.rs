use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle is monotonic: a pull request is created OPEN and can only move
/// to MERGED, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "MERGED")]
    Merged,
}

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub created_at: DateTimeUtc,
    pub merged_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::UserId"
    )]
    Author,
}

impl Related<super::pr_reviewer::Entity> for Entity {
    fn to() -> RelationDef {
        super::pr_reviewer::Relation::PullRequest.def().rev()
    }
}

impl ActiveModelBehavior for ActiveModel {}
