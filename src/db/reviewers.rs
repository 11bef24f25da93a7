use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use chrono::Utc;
use entity::pr_reviewer::{
    ActiveModel as ReviewerActive, Column as ReviewerColumn, Entity as PrReviewer,
};
use entity::pull_request::{Column as PrColumn, Entity as PullRequest, PrStatus};
use entity::review_assignment::{
    ActiveModel as AssignmentActive, AssignmentAction, Entity as ReviewAssignment,
};
use entity::user::{Column as UserColumn, Entity as User};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
};

/// An open reviewer slot held by a just-deactivated user, found by the
/// deactivation scan.
pub(crate) struct AffectedReview {
    pub pull_request_id: String,
    pub reviewer_id: String,
    pub author_id: String,
}

/// Transaction-scoped helpers shared by the assignment operations. Generic
/// over the connection so the read-only projections can reuse them outside
/// a transaction.
impl PostgresService {
    pub(crate) async fn list_reviewer_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
    ) -> Result<Vec<String>, AppError> {
        Ok(PrReviewer::find()
            .filter(ReviewerColumn::PullRequestId.eq(pr_id))
            .order_by_asc(ReviewerColumn::Position)
            .all(conn)
            .await?
            .into_iter()
            .map(|r| r.user_id)
            .collect())
    }

    pub(crate) async fn insert_reviewers<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        reviewers: &[String],
    ) -> Result<(), AppError> {
        for (i, uid) in reviewers.iter().enumerate() {
            PrReviewer::insert(ReviewerActive {
                pull_request_id: Set(pr_id.to_owned()),
                user_id: Set(uid.clone()),
                position: Set(i as i32 + 1),
            })
            .exec_without_returning(conn)
            .await?;
        }
        Ok(())
    }

    /// In-place swap of one reviewer slot; position is untouched.
    pub(crate) async fn replace_reviewer<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        old_id: &str,
        new_id: &str,
    ) -> Result<(), AppError> {
        let res = PrReviewer::update_many()
            .col_expr(ReviewerColumn::UserId, Expr::value(new_id))
            .filter(ReviewerColumn::PullRequestId.eq(pr_id))
            .filter(ReviewerColumn::UserId.eq(old_id))
            .exec(conn)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotAssigned);
        }
        Ok(())
    }

    pub(crate) async fn remove_reviewer<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        PrReviewer::delete_many()
            .filter(ReviewerColumn::PullRequestId.eq(pr_id))
            .filter(ReviewerColumn::UserId.eq(user_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    pub(crate) async fn log_assignments<C: ConnectionTrait>(
        &self,
        conn: &C,
        pr_id: &str,
        user_ids: &[String],
        action: AssignmentAction,
    ) -> Result<(), AppError> {
        for uid in user_ids {
            ReviewAssignment::insert(AssignmentActive {
                id: NotSet,
                pull_request_id: Set(pr_id.to_owned()),
                assigned_user_id: Set(uid.clone()),
                action: Set(action),
                created_at: Set(Utc::now()),
            })
            .exec_without_returning(conn)
            .await?;
        }
        Ok(())
    }

    /// Active members of `team` minus `exclude`. This is the candidate pool
    /// for every assignment decision.
    pub(crate) async fn active_team_members<C: ConnectionTrait>(
        &self,
        conn: &C,
        team: &str,
        exclude: &[String],
    ) -> Result<Vec<String>, AppError> {
        Ok(User::find()
            .filter(UserColumn::TeamName.eq(team))
            .filter(UserColumn::IsActive.eq(true))
            .all(conn)
            .await?
            .into_iter()
            .filter(|u| !exclude.contains(&u.user_id))
            .map(|u| u.user_id)
            .collect())
    }

    pub(crate) async fn affected_open_reviews<C: ConnectionTrait>(
        &self,
        conn: &C,
        deactivated: &[String],
    ) -> Result<Vec<AffectedReview>, AppError> {
        let rows = PrReviewer::find()
            .find_also_related(PullRequest)
            .filter(ReviewerColumn::UserId.is_in(deactivated.to_vec()))
            .filter(PrColumn::Status.eq(PrStatus::Open))
            .all(conn)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(rev, pr)| {
                pr.map(|p| AffectedReview {
                    pull_request_id: rev.pull_request_id,
                    reviewer_id: rev.user_id,
                    author_id: p.author_id,
                })
            })
            .collect())
    }
}
