use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use super::model::{
    ConsumeSecretRequest, ConsumeSecretResponse, CreateSecretRequest, CreateSecretResponse,
    ExistsQuery, ExistsResponse,
};
use crate::AppState;
use crate::error::VaultError;
use crate::utils::{error_codes, error_to_api_response, success_to_api_response};

#[axum::debug_handler]
pub async fn create_secret(
    State(state): State<AppState>,
    Json(req): Json<CreateSecretRequest>,
) -> impl IntoResponse {
    // 密文大小与保存时长在进入保管库之前校验
    if req.ciphertext.is_empty() || req.ciphertext.len() > state.config.max_ciphertext_bytes {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                format!(
                    "密文长度须在1到{}字节之间",
                    state.config.max_ciphertext_bytes
                ),
            ),
        );
    }

    if !state.config.ttl_in_bounds(req.expires_in_secs) {
        return (
            StatusCode::BAD_REQUEST,
            error_to_api_response(
                error_codes::VALIDATION_ERROR,
                format!(
                    "保存时长须在{}到{}秒之间",
                    state.config.secret_ttl_min_secs, state.config.secret_ttl_max_secs
                ),
            ),
        );
    }

    match state
        .vault
        .create_secret(req.ciphertext, req.expires_in_secs)
        .await
    {
        Ok(secret_id) => (
            StatusCode::CREATED,
            success_to_api_response(CreateSecretResponse { secret_id }),
        ),
        Err(e) => {
            tracing::error!("Failed to create secret: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "创建秘密失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn consume_secret(
    State(state): State<AppState>,
    Json(req): Json<ConsumeSecretRequest>,
) -> impl IntoResponse {
    match state.vault.consume_secret(&req.secret_id).await {
        Ok(ciphertext) => (
            StatusCode::OK,
            success_to_api_response(ConsumeSecretResponse { ciphertext }),
        ),
        // 不存在、已读取、已过期统一返回同一种响应
        Err(VaultError::Gone) => (
            StatusCode::GONE,
            error_to_api_response(
                error_codes::SECRET_GONE,
                "秘密不存在、已被读取或已过期".to_string(),
            ),
        ),
        Err(e) => {
            tracing::error!("Failed to consume secret: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "读取秘密失败".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn check_secret_exists(
    State(state): State<AppState>,
    Query(query): Query<ExistsQuery>,
) -> impl IntoResponse {
    match state.vault.secret_exists(&query.secret_id).await {
        Ok(exists) => (
            StatusCode::OK,
            success_to_api_response(ExistsResponse { exists }),
        ),
        Err(e) => {
            tracing::error!("Failed to check secret existence: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "查询秘密状态失败".to_string()),
            )
        }
    }
}
