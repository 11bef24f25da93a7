use crate::db::postgres_service::PostgresService;
use crate::selector::pick_n;
use crate::types::error::AppError;
use crate::types::team::{
    DeactivationRes, RTeamMember, SafeReassignCounts, TeamMemberDto, TeamWithMembers,
};
use chrono::Utc;
use entity::pull_request::PrStatus;
use entity::review_assignment::AssignmentAction;
use entity::team::{ActiveModel as TeamActive, Entity as Team};
use entity::user::{ActiveModel as UserActive, Column as UserColumn, Entity as User};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};

/// Per-slot outcome of the deactivation cascade. A slot either gets a new
/// same-team reviewer or is dropped; the cascade never fails a slot.
pub(crate) enum SlotRepair {
    Reassigned(String),
    Removed,
}

impl PostgresService {
    /// Creates a team and upserts its members in one transaction. An existing
    /// user row is adopted into this team, last writer wins; this is how a
    /// previously orphaned user is re-added to a roster.
    pub async fn create_team(
        &self,
        team_name: &str,
        members: &[RTeamMember],
    ) -> Result<TeamWithMembers, AppError> {
        let txn = self.database_connection.begin().await?;

        let exists = Team::find_by_id(team_name.to_owned())
            .one(&txn)
            .await?
            .is_some();
        if exists {
            return Err(AppError::TeamExists);
        }

        // A concurrent creation can slip between the existence check and the
        // insert; the primary key settles it and the loser reports the same
        // error as the check.
        Team::insert(TeamActive {
            team_name: Set(team_name.to_owned()),
            created_at: Set(Utc::now()),
        })
        .exec_without_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::TeamExists,
            _ => AppError::from(e),
        })?;

        for m in members {
            if m.user_id.is_empty() || m.username.is_empty() {
                return Err(AppError::Validation(
                    "member user_id and username are required".into(),
                ));
            }
            User::insert(UserActive {
                user_id: Set(m.user_id.clone()),
                username: Set(m.username.clone()),
                is_active: Set(m.is_active),
                team_name: Set(Some(team_name.to_owned())),
            })
            .on_conflict(
                OnConflict::column(UserColumn::UserId)
                    .update_columns([
                        UserColumn::Username,
                        UserColumn::IsActive,
                        UserColumn::TeamName,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;
        self.get_team(team_name).await
    }

    pub async fn get_team(&self, team_name: &str) -> Result<TeamWithMembers, AppError> {
        let team = Team::find_by_id(team_name.to_owned())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound)?;
        let members = User::find()
            .filter(UserColumn::TeamName.eq(team_name))
            .order_by_asc(UserColumn::UserId)
            .all(&self.database_connection)
            .await?;
        Ok(TeamWithMembers {
            team_name: team.team_name,
            members: members
                .into_iter()
                .map(|u| TeamMemberDto {
                    user_id: u.user_id,
                    username: u.username,
                    is_active: u.is_active,
                })
                .collect(),
        })
    }

    /// Deactivates members of `team` and repairs every open PR they were
    /// reviewing, all in one transaction. An empty `user_ids` means the whole
    /// roster; ids that are foreign or already inactive are ignored.
    pub async fn deactivate_team_members(
        &self,
        team: &str,
        user_ids: &[String],
    ) -> Result<DeactivationRes, AppError> {
        let txn = self.database_connection.begin().await?;

        Team::find_by_id(team.to_owned())
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut victims = User::find()
            .filter(UserColumn::TeamName.eq(team))
            .filter(UserColumn::IsActive.eq(true));
        if !user_ids.is_empty() {
            victims = victims.filter(UserColumn::UserId.is_in(user_ids.to_vec()));
        }
        let deactivated: Vec<String> = victims
            .all(&txn)
            .await?
            .into_iter()
            .map(|u| u.user_id)
            .collect();

        let mut counts = SafeReassignCounts::default();

        if !deactivated.is_empty() {
            User::update_many()
                .col_expr(UserColumn::IsActive, Expr::value(false))
                .filter(UserColumn::UserId.is_in(deactivated.clone()))
                .exec(&txn)
                .await?;

            for affected in self.affected_open_reviews(&txn, &deactivated).await? {
                // Lock the PR row; a merge may have slipped in between the
                // scan and this slot, in which case the list is frozen.
                let pr = match self.pr_for_update(&txn, &affected.pull_request_id).await? {
                    Some(pr) if pr.status == PrStatus::Open => pr,
                    _ => continue,
                };
                match self
                    .repair_reviewer_slot(&txn, &pr, &affected.reviewer_id)
                    .await?
                {
                    SlotRepair::Reassigned(new_id) => {
                        log::debug!(
                            "PR {}: reviewer {} -> {}",
                            affected.pull_request_id,
                            affected.reviewer_id,
                            new_id
                        );
                        counts.reassigned += 1;
                    }
                    SlotRepair::Removed => counts.removed += 1,
                }
            }
        }

        txn.commit().await?;
        log::info!(
            "deactivated {} member(s) of team {}: reassigned={} removed={}",
            deactivated.len(),
            team,
            counts.reassigned,
            counts.removed
        );
        Ok(DeactivationRes {
            team_name: team.to_owned(),
            deactivated,
            safe_reassign: counts,
        })
    }

    /// One cascade step: replace `old_id` on `pr` with an eligible teammate,
    /// or drop the slot when none exists. Lack of a candidate is a designed
    /// fallback here, never an error; manual reassignment fails loudly
    /// instead.
    pub(crate) async fn repair_reviewer_slot(
        &self,
        txn: &DatabaseTransaction,
        pr: &entity::pull_request::Model,
        old_id: &str,
    ) -> Result<SlotRepair, AppError> {
        let old_team = User::find_by_id(old_id.to_owned())
            .one(txn)
            .await?
            .and_then(|u| u.team_name);

        // An orphaned record cannot name a replacement pool.
        let Some(old_team) = old_team else {
            self.remove_reviewer(txn, &pr.pull_request_id, old_id).await?;
            return Ok(SlotRepair::Removed);
        };

        let current = self.list_reviewer_ids(txn, &pr.pull_request_id).await?;
        let mut exclude = vec![pr.author_id.clone(), old_id.to_owned()];
        exclude.extend(current);

        let candidates = self.active_team_members(txn, &old_team, &exclude).await?;
        if candidates.is_empty() {
            self.remove_reviewer(txn, &pr.pull_request_id, old_id).await?;
            return Ok(SlotRepair::Removed);
        }

        let new_id = pick_n(&candidates, 1).remove(0);
        self.replace_reviewer(txn, &pr.pull_request_id, old_id, &new_id)
            .await?;
        self.log_assignments(
            txn,
            &pr.pull_request_id,
            std::slice::from_ref(&new_id),
            AssignmentAction::SafeReassign,
        )
        .await?;
        Ok(SlotRepair::Reassigned(new_id))
    }
}
