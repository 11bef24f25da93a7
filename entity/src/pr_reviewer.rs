use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One reviewer slot on a pull request. `position` records insertion order
/// and is only used for stable listing; it carries no priority meaning.
#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pr_reviewers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub pull_request_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub position: i32,
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
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
}

impl Related<super::pull_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PullRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
