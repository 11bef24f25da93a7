use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamAdd, TeamAddRes};

#[post("/add")]
async fn add_team(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RTeamAdd>,
) -> ApiResult<TeamAddRes> {
    let req = data.into_inner();
    if req.team_name.is_empty() {
        return Err(AppError::Validation("team_name is required".into()));
    }

    let team = db.create_team(&req.team_name, &req.members).await?;
    Ok(ApiResponse::Created(TeamAddRes { team }))
}
