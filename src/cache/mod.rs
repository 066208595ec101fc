// 缓存模块
// 包含缓存数据结构和操作逻辑

pub mod keys;
pub mod models;
pub mod operations;

// 重新导出常用类型和函数，方便其他模块使用
pub use models::rate_limit::RateLimitOutcome;
pub use models::secret::CachedSecret;
pub use operations::memory::{MemoryRateLimitStore, MemorySecretStore};
pub use operations::rate_limit::{RateCounterStore, RedisRateLimitStore};
pub use operations::secret::{RedisSecretStore, SecretStore};
