use axum::Json;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use serde::Serialize;

/// 统一的接口响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 错误码，0表示成功，非0表示失败
    pub code: i32,
    /// 错误消息，成功时为"success"
    pub msg: String,
    /// 响应数据，错误时为None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resp_data: Option<T>,
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const SECRET_GONE: i32 = 1004;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// 秘密标识符的随机字节数，128 位熵
const SECRET_ID_BYTES: usize = 16;

/// 生成 URL 安全、无填充字符的随机秘密标识符
///
/// 唯一性依赖 128 位随机空间的生日界，不对存储做查重。
/// 系统随机源不可用时 fill_bytes 直接 panic，可预测的标识符没有降级余地。
pub fn generate_secret_id() -> String {
    let mut bytes = [0u8; SECRET_ID_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn secret_id_is_url_safe_without_padding() {
        let id = generate_secret_id();

        assert!(!id.contains('='));
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn secret_id_decodes_to_full_entropy() {
        let id = generate_secret_id();
        let bytes = URL_SAFE_NO_PAD.decode(&id).unwrap();

        assert_eq!(bytes.len(), SECRET_ID_BYTES);
    }

    #[test]
    fn secret_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_secret_id()).collect();

        assert_eq!(ids.len(), 1000);
    }
}
