use actix_web::get;
use serde::{Deserialize, Serialize};

use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
}

#[get("/healthz")]
async fn healthz(_req: actix_web::HttpRequest) -> ApiResult<Response> {
    Ok(ApiResponse::Ok(Response { ok: true }))
}
