use crate::db::postgres_service::PostgresService;
use crate::selector::pick_n;
use crate::types::error::AppError;
use crate::types::pull_request::PullRequestDto;
use chrono::Utc;
use entity::pull_request::{
    ActiveModel as PrActive, Entity as PullRequest, Model as PrModel, PrStatus,
};
use entity::review_assignment::AssignmentAction;
use entity::user::Entity as User;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, QuerySelect, Set, SqlErr,
    TransactionTrait,
};

impl PostgresService {
    /// Fetch-for-update: takes the row-level exclusive lock that serializes
    /// merge, reassignment and the deactivation cascade on one PR.
    pub(crate) async fn pr_for_update(
        &self,
        txn: &DatabaseTransaction,
        pr_id: &str,
    ) -> Result<Option<PrModel>, AppError> {
        Ok(PullRequest::find_by_id(pr_id.to_owned())
            .lock_exclusive()
            .one(txn)
            .await?)
    }

    /// Creates an OPEN pull request and auto-assigns up to two random active
    /// teammates of the author. Fewer eligible teammates, down to none, is
    /// not an error.
    pub async fn create_pull_request(
        &self,
        pr_id: &str,
        pr_name: &str,
        author_id: &str,
    ) -> Result<PullRequestDto, AppError> {
        let txn = self.database_connection.begin().await?;

        let author = User::find_by_id(author_id.to_owned())
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        // An author without a team has no reviewer pool.
        let team = author.team_name.clone().ok_or(AppError::NotFound)?;

        if PullRequest::find_by_id(pr_id.to_owned())
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(AppError::PrExists);
        }

        let candidates = self
            .active_team_members(&txn, &team, std::slice::from_ref(&author.user_id))
            .await?;
        let reviewers = pick_n(&candidates, 2);

        // The primary key settles a creation race the same way the existence
        // check would have.
        PullRequest::insert(PrActive {
            pull_request_id: Set(pr_id.to_owned()),
            pull_request_name: Set(pr_name.to_owned()),
            author_id: Set(author_id.to_owned()),
            status: Set(PrStatus::Open),
            created_at: Set(Utc::now()),
            merged_at: Set(None),
        })
        .exec_without_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::PrExists,
            _ => AppError::from(e),
        })?;

        self.insert_reviewers(&txn, pr_id, &reviewers).await?;
        self.log_assignments(&txn, pr_id, &reviewers, AssignmentAction::AutoAssign)
            .await?;

        txn.commit().await?;
        self.get_pull_request(pr_id).await
    }

    /// Idempotent OPEN -> MERGED transition; merged_at keeps its first value.
    pub async fn merge_pull_request(&self, pr_id: &str) -> Result<PullRequestDto, AppError> {
        let txn = self.database_connection.begin().await?;

        let pr = self
            .pr_for_update(&txn, pr_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if pr.status == PrStatus::Merged {
            txn.commit().await?;
            return self.get_pull_request(pr_id).await;
        }

        let mut am: PrActive = pr.into();
        am.status = Set(PrStatus::Merged);
        am.merged_at = Set(Some(Utc::now()));
        am.update(&txn).await?;

        txn.commit().await?;
        self.get_pull_request(pr_id).await
    }

    /// Swaps one assigned reviewer for a random eligible teammate of the old
    /// reviewer. Unlike the deactivation cascade this fails loudly when no
    /// candidate exists and keeps the old reviewer in place.
    pub async fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_user_id: &str,
    ) -> Result<(PullRequestDto, String), AppError> {
        let txn = self.database_connection.begin().await?;

        let pr = self
            .pr_for_update(&txn, pr_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if pr.status == PrStatus::Merged {
            return Err(AppError::PrMerged);
        }

        let reviewers = self.list_reviewer_ids(&txn, pr_id).await?;
        if !reviewers.iter().any(|r| r == old_user_id) {
            return Err(AppError::NotAssigned);
        }
        let others: Vec<String> = reviewers
            .into_iter()
            .filter(|r| r != old_user_id)
            .collect();

        let old_user = User::find_by_id(old_user_id.to_owned())
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        let team = old_user.team_name.ok_or(AppError::NotFound)?;

        let mut exclude = vec![pr.author_id.clone(), old_user_id.to_owned()];
        exclude.extend(others);
        let candidates = self.active_team_members(&txn, &team, &exclude).await?;
        if candidates.is_empty() {
            return Err(AppError::NoCandidate);
        }

        let new_id = pick_n(&candidates, 1).remove(0);
        self.replace_reviewer(&txn, pr_id, old_user_id, &new_id)
            .await?;
        self.log_assignments(
            &txn,
            pr_id,
            std::slice::from_ref(&new_id),
            AssignmentAction::Reassign,
        )
        .await?;

        txn.commit().await?;
        let updated = self.get_pull_request(pr_id).await?;
        Ok((updated, new_id))
    }

    pub async fn get_pull_request(&self, pr_id: &str) -> Result<PullRequestDto, AppError> {
        let pr = PullRequest::find_by_id(pr_id.to_owned())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound)?;
        let reviewers = self
            .list_reviewer_ids(&self.database_connection, pr_id)
            .await?;
        Ok(PullRequestDto::from_model(pr, reviewers))
    }
}
