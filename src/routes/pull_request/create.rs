use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::pull_request::{PrRes, RPrCreate};
use crate::types::response::{ApiResponse, ApiResult};

#[post("/create")]
async fn create_pull_request(
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RPrCreate>,
) -> ApiResult<PrRes> {
    let req = data.into_inner();
    if req.pull_request_id.is_empty() || req.pull_request_name.is_empty() || req.author_id.is_empty()
    {
        return Err(AppError::Validation(
            "pull_request_id, pull_request_name and author_id are required".into(),
        ));
    }

    let pr = db
        .create_pull_request(&req.pull_request_id, &req.pull_request_name, &req.author_id)
        .await?;
    Ok(ApiResponse::Created(PrRes { pr }))
}
