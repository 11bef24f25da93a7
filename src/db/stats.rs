use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::stats::{PrAssignStat, UserAssignStat};
use entity::review_assignment::{Column as AssignmentColumn, Entity as ReviewAssignment};
use sea_orm::{ColumnTrait, EntityTrait, QueryOrder, QuerySelect};

/// Read-only aggregates over the assignment audit log. No business rules
/// live here.
impl PostgresService {
    pub async fn stats_by_users(&self) -> Result<Vec<UserAssignStat>, AppError> {
        let rows: Vec<(String, i64)> = ReviewAssignment::find()
            .select_only()
            .column(AssignmentColumn::AssignedUserId)
            .column_as(AssignmentColumn::Id.count(), "count")
            .group_by(AssignmentColumn::AssignedUserId)
            .order_by_desc(AssignmentColumn::Id.count())
            .into_tuple()
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(user_id, count)| UserAssignStat { user_id, count })
            .collect())
    }

    pub async fn stats_by_prs(&self) -> Result<Vec<PrAssignStat>, AppError> {
        let rows: Vec<(String, i64)> = ReviewAssignment::find()
            .select_only()
            .column(AssignmentColumn::PullRequestId)
            .column_as(AssignmentColumn::Id.count(), "count")
            .group_by(AssignmentColumn::PullRequestId)
            .order_by_desc(AssignmentColumn::Id.count())
            .into_tuple()
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(pull_request_id, count)| PrAssignStat {
                pull_request_id,
                count,
            })
            .collect())
    }
}
