use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::pull_request::PullRequestShort;
use crate::types::user::UserDto;
use entity::pr_reviewer::{Column as ReviewerColumn, Entity as PrReviewer};
use entity::pull_request::{Column as PrColumn, Entity as PullRequest};
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl PostgresService {
    pub async fn get_user(&self, user_id: &str) -> Result<UserModel, AppError> {
        User::find_by_id(user_id.to_owned())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn set_user_active(
        &self,
        user_id: &str,
        active: bool,
    ) -> Result<UserDto, AppError> {
        let user = self.get_user(user_id).await?;
        let mut am: UserActive = user.into();
        am.is_active = Set(active);
        let updated = am.update(&self.database_connection).await?;
        Ok(updated.into())
    }

    /// Pull requests where the user holds a reviewer slot, newest first.
    pub async fn list_reviewed_prs(
        &self,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>, AppError> {
        self.get_user(user_id).await?;

        let rows = PrReviewer::find()
            .find_also_related(PullRequest)
            .filter(ReviewerColumn::UserId.eq(user_id))
            .order_by_desc(PrColumn::CreatedAt)
            .all(&self.database_connection)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, pr)| pr)
            .map(|p| PullRequestShort {
                pull_request_id: p.pull_request_id,
                pull_request_name: p.pull_request_name,
                author_id: p.author_id,
                status: p.status,
            })
            .collect())
    }
}
