//! 本地开发与测试用的内存存储实现
//!
//! 通过互斥锁把读改写合并为单步，与 Redis 实现保持相同的原子语义；
//! 过期采用惰性清理，访问到已过期的条目时按不存在处理。

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::cache::models::rate_limit::RateLimitOutcome;
use crate::cache::models::secret::CachedSecret;
use crate::error::CacheError;

use super::rate_limit::RateCounterStore;
use super::secret::SecretStore;

/// 内存版秘密记录存储
#[derive(Default)]
pub struct MemorySecretStore {
    records: Mutex<HashMap<String, (CachedSecret, Instant)>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn put(&self, record: &CachedSecret, ttl_secs: u64) -> Result<(), CacheError> {
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        records.insert(record.secret_id.clone(), (record.clone(), deadline));

        Ok(())
    }

    async fn take(&self, secret_id: &str) -> Result<Option<CachedSecret>, CacheError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        match records.remove(secret_id) {
            Some((record, deadline)) if deadline > Instant::now() => Ok(Some(record)),
            // 已过期的条目视作不存在，移除即清理
            _ => Ok(None),
        }
    }

    async fn exists(&self, secret_id: &str) -> Result<bool, CacheError> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());

        match records.get(secret_id) {
            Some((_, deadline)) if *deadline > Instant::now() => Ok(true),
            Some(_) => {
                records.remove(secret_id);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

/// 内存版限流计数器存储
#[derive(Default)]
pub struct MemoryRateLimitStore {
    counters: Mutex<HashMap<String, (u32, Instant)>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateCounterStore for MemoryRateLimitStore {
    async fn incr_within_limit(
        &self,
        client_key: &str,
        limit: u32,
        window_secs: u64,
    ) -> Result<RateLimitOutcome, CacheError> {
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());

        match counters.get_mut(client_key) {
            Some((count, window_end)) if *window_end > now => {
                if *count < limit {
                    *count += 1;
                    Ok(RateLimitOutcome::Allowed { count: *count })
                } else {
                    Ok(RateLimitOutcome::Denied)
                }
            }
            // 窗口不存在或已结束，从 1 开始新窗口
            _ => {
                let window_end = now + Duration::from_secs(window_secs);
                counters.insert(client_key.to_string(), (1, window_end));
                Ok(RateLimitOutcome::Allowed { count: 1 })
            }
        }
    }

    async fn current_count(&self, client_key: &str) -> Result<u32, CacheError> {
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());

        match counters.get(client_key) {
            Some((count, window_end)) if *window_end > now => Ok(*count),
            Some(_) => {
                counters.remove(client_key);
                Ok(0)
            }
            None => Ok(0),
        }
    }

    async fn remaining_window(&self, client_key: &str) -> Result<Option<u64>, CacheError> {
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());

        match counters.get(client_key) {
            Some((_, window_end)) if *window_end > now => {
                Ok(Some(window_end.duration_since(now).as_secs()))
            }
            Some(_) => {
                counters.remove(client_key);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
