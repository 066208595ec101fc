use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, Script};

use crate::cache::keys::rate_limit_key;
use crate::cache::models::rate_limit::RateLimitOutcome;
use crate::error::CacheError;

/// 固定窗口限流脚本：
/// 键不存在则置 1 并设置窗口过期；计数未达上限则自增；否则返回 -1 且不做任何改动
const INCR_WITHIN_LIMIT_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if current == false then
  redis.call('SET', KEYS[1], 1)
  redis.call('EXPIRE', KEYS[1], tonumber(ARGV[2]))
  return 1
end
current = tonumber(current)
if current < tonumber(ARGV[1]) then
  return redis.call('INCR', KEYS[1])
else
  return -1
end
"#;

/// 限流计数器存储接口
///
/// incr_within_limit 必须在存储端一步完成判断与自增，
/// 并发调用同一键时放行总数不能超过上限。
#[async_trait]
pub trait RateCounterStore: Send + Sync {
    /// 原子自增：窗口不存在则从 1 开始并设置过期，计数达到上限则拒绝
    async fn incr_within_limit(
        &self,
        client_key: &str,
        limit: u32,
        window_secs: u64,
    ) -> Result<RateLimitOutcome, CacheError>;

    /// 当前窗口计数（只读，仅用于观测）
    async fn current_count(&self, client_key: &str) -> Result<u32, CacheError>;

    /// 窗口剩余秒数；计数器不存在时返回 None
    async fn remaining_window(&self, client_key: &str) -> Result<Option<u64>, CacheError>;
}

/// 基于 Redis 的限流计数器存储
pub struct RedisRateLimitStore {
    redis: Arc<RedisClient>,
    script: Script,
}

impl RedisRateLimitStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self {
            redis,
            script: Script::new(INCR_WITHIN_LIMIT_SCRIPT),
        }
    }
}

#[async_trait]
impl RateCounterStore for RedisRateLimitStore {
    async fn incr_within_limit(
        &self,
        client_key: &str,
        limit: u32,
        window_secs: u64,
    ) -> Result<RateLimitOutcome, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let count: i64 = self
            .script
            .key(rate_limit_key(client_key))
            .arg(limit)
            .arg(window_secs)
            .invoke_async(&mut conn)
            .await?;

        if count < 0 {
            Ok(RateLimitOutcome::Denied)
        } else {
            Ok(RateLimitOutcome::Allowed {
                count: count as u32,
            })
        }
    }

    async fn current_count(&self, client_key: &str) -> Result<u32, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let count: Option<u32> = conn.get(rate_limit_key(client_key)).await?;

        Ok(count.unwrap_or(0))
    }

    async fn remaining_window(&self, client_key: &str) -> Result<Option<u64>, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        // TTL 返回 -2 表示键不存在，-1 表示键没有过期时间
        let ttl: i64 = conn.ttl(rate_limit_key(client_key)).await?;

        if ttl < 0 {
            Ok(None)
        } else {
            Ok(Some(ttl as u64))
        }
    }
}
