/// 缓存数据模型
/// 定义缓存数据的结构体

// 秘密记录缓存模型
pub mod secret;

// 限流缓存模型
pub mod rate_limit;

// 重新导出常用类型
pub use rate_limit::RateLimitOutcome;
pub use secret::CachedSecret;
