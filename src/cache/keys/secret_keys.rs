/// 秘密记录缓存键前缀
const SECRET_PREFIX: &str = "secret:";

/// 生成秘密记录缓存键
pub fn secret_key(secret_id: &str) -> String {
    format!("{}{}", SECRET_PREFIX, secret_id)
}
