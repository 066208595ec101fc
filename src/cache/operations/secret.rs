use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use crate::cache::keys::secret_key;
use crate::cache::models::secret::CachedSecret;
use crate::error::CacheError;

/// 秘密记录存储接口
///
/// take 对同一键必须表现为串行化的单步操作：并发调用同一 secret_id 时
/// 至多一个调用方拿到记录，删除恰好发生一次。
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// 写入记录并设置过期时间
    async fn put(&self, record: &CachedSecret, ttl_secs: u64) -> Result<(), CacheError>;

    /// 原子地取出并删除记录
    async fn take(&self, secret_id: &str) -> Result<Option<CachedSecret>, CacheError>;

    /// 记录是否存在（只读，不影响存在性与过期时间）
    async fn exists(&self, secret_id: &str) -> Result<bool, CacheError>;
}

/// 基于 Redis 的秘密记录存储
pub struct RedisSecretStore {
    redis: Arc<RedisClient>,
}

impl RedisSecretStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl SecretStore for RedisSecretStore {
    async fn put(&self, record: &CachedSecret, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let key = secret_key(&record.secret_id);
        let json = serde_json::to_string(record)?;

        let _: () = conn.set_ex(key, json, ttl_secs).await?;

        Ok(())
    }

    async fn take(&self, secret_id: &str) -> Result<Option<CachedSecret>, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        // GETDEL 在服务端一步完成读取与删除
        let result: Option<String> = redis::cmd("GETDEL")
            .arg(secret_key(secret_id))
            .query_async(&mut conn)
            .await?;

        match result {
            Some(json) => {
                let record = serde_json::from_str(&json)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, secret_id: &str) -> Result<bool, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let exists: bool = conn.exists(secret_key(secret_id)).await?;

        Ok(exists)
    }
}
