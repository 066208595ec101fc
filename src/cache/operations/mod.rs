/// 缓存操作
/// 定义各类缓存的读写逻辑

pub mod memory;
pub mod rate_limit;
pub mod secret;
