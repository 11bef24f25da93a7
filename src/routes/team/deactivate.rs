use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{DeactivationRes, RTeamDeactivate};

/// Deactivates members (all of them when `user_ids` is empty) and triggers
/// the safe-reassign cascade over their open reviews.
#[post("/deactivate")]
async fn deactivate_members(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RTeamDeactivate>,
) -> ApiResult<DeactivationRes> {
    let req = data.into_inner();
    if req.team_name.is_empty() {
        return Err(AppError::Validation("team_name is required".into()));
    }

    let res = db
        .deactivate_team_members(&req.team_name, &req.user_ids)
        .await?;
    Ok(ApiResponse::Ok(res))
}
