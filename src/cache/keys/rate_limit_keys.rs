/// 限流计数器缓存键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成限流计数器缓存键
pub fn rate_limit_key(client_key: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, client_key)
}
