use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::stats::{StatsQuery, StatsRes};

#[get("/get")]
async fn get_stats(
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<StatsQuery>,
) -> ApiResult<StatsRes> {
    match query.by.as_deref().unwrap_or("users") {
        "users" => Ok(ApiResponse::Ok(StatsRes::ByUsers {
            by_users: db.stats_by_users().await?,
        })),
        "prs" => Ok(ApiResponse::Ok(StatsRes::ByPrs {
            by_prs: db.stats_by_prs().await?,
        })),
        other => Err(AppError::Validation(format!("unknown by param: {other}"))),
    }
}
