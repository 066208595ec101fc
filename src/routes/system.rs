use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::utils::success_to_api_response;

/// 健康检查响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
    pub server_time: String,
}

/// 健康检查接口，经过与业务接口相同的限流
pub async fn ping() -> impl IntoResponse {
    let now = chrono::Utc::now();

    (
        StatusCode::OK,
        success_to_api_response(PingResponse {
            status: "ok".to_string(),
            server_time: now.to_rfc3339(),
        }),
    )
}
