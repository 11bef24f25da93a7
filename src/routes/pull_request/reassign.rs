use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::pull_request::{PrReassignRes, RPrReassign};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/reassign")]
async fn reassign_reviewer(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RPrReassign>,
) -> ApiResult<PrReassignRes> {
    let req = data.into_inner();
    if req.pull_request_id.is_empty() || req.old_user_id.is_empty() {
        return Err(AppError::Validation(
            "pull_request_id and old_user_id are required".into(),
        ));
    }

    let (pr, replaced_by) = db
        .reassign_reviewer(&req.pull_request_id, &req.old_user_id)
        .await?;
    Ok(ApiResponse::Ok(PrReassignRes { pr, replaced_by }))
}
