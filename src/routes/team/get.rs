use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{TeamGetQuery, TeamWithMembers};

#[get("/get")]
async fn get_team(
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<TeamGetQuery>,
) -> ApiResult<TeamWithMembers> {
    if query.team_name.is_empty() {
        return Err(AppError::Validation("team_name is required".into()));
    }

    let team = db.get_team(&query.team_name).await?;
    Ok(ApiResponse::Ok(team))
}
