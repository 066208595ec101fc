use thiserror::Error;

/// 缓存层错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis 操作失败: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("缓存记录编解码失败: {0}")]
    Codec(#[from] serde_json::Error),
}

/// 秘密保管库错误
#[derive(Debug, Error)]
pub enum VaultError {
    /// 不存在、已被读取、已过期三种情况对调用方不作区分
    #[error("秘密不存在、已被读取或已过期")]
    Gone,

    #[error(transparent)]
    Cache(#[from] CacheError),
}
