use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub secret_ttl_min_secs: u64,
    pub secret_ttl_max_secs: u64,
    pub max_ciphertext_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            redis_url: env::var("REDIS_URL")?,
            server_host: env::var("SERVER_HOST")?,
            server_port: env::var("SERVER_PORT")?.parse().unwrap_or(3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".to_string()),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_requests: env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            // 密文保存时长限制：默认 1 分钟到 7 天
            secret_ttl_min_secs: env::var("SECRET_TTL_MIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            secret_ttl_max_secs: env::var("SECRET_TTL_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800),
            max_ciphertext_bytes: env::var("MAX_CIPHERTEXT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100_000),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// 校验密文保存时长是否在允许范围内
    pub fn ttl_in_bounds(&self, ttl_secs: u64) -> bool {
        ttl_secs >= self.secret_ttl_min_secs && ttl_secs <= self.secret_ttl_max_secs
    }
}
