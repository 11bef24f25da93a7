use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{ReviewedPrsRes, UserGetQuery};

#[get("/getReview")]
async fn get_review(
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<UserGetQuery>,
) -> ApiResult<ReviewedPrsRes> {
    if query.user_id.is_empty() {
        return Err(AppError::Validation("user_id is required".into()));
    }

    let pull_requests = db.list_reviewed_prs(&query.user_id).await?;
    Ok(ApiResponse::Ok(ReviewedPrsRes {
        user_id: query.into_inner().user_id,
        pull_requests,
    }))
}
