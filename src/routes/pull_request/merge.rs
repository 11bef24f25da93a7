use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::pull_request::{PrRes, RPrMerge};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/merge")]
async fn merge_pull_request(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RPrMerge>,
) -> ApiResult<PrRes> {
    let req = data.into_inner();
    if req.pull_request_id.is_empty() {
        return Err(AppError::Validation("pull_request_id is required".into()));
    }

    let pr = db.merge_pull_request(&req.pull_request_id).await?;
    Ok(ApiResponse::Ok(PrRes { pr }))
}
