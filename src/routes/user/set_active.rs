use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{RSetIsActive, UserRes};

#[post("/setIsActive")]
async fn set_is_active(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RSetIsActive>,
) -> ApiResult<UserRes> {
    let req = data.into_inner();
    if req.user_id.is_empty() {
        return Err(AppError::Validation("user_id is required".into()));
    }

    let user = db.set_user_active(&req.user_id, req.is_active).await?;
    Ok(ApiResponse::Ok(UserRes { user }))
}
