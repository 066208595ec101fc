use serde::{Deserialize, Serialize};

/// 创建秘密请求
///
/// 密文由客户端加密后提交，服务端不解密也不检查其结构。
#[derive(Debug, Deserialize)]
pub struct CreateSecretRequest {
    pub ciphertext: String,
    pub expires_in_secs: u64,
}

/// 创建秘密响应
#[derive(Debug, Serialize)]
pub struct CreateSecretResponse {
    pub secret_id: String,
}

/// 读取秘密请求
#[derive(Debug, Deserialize)]
pub struct ConsumeSecretRequest {
    pub secret_id: String,
}

/// 读取秘密响应
#[derive(Debug, Serialize)]
pub struct ConsumeSecretResponse {
    pub ciphertext: String,
}

/// 存在性查询参数
#[derive(Debug, Deserialize)]
pub struct ExistsQuery {
    pub secret_id: String,
}

/// 存在性查询响应
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
