use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    cache::models::rate_limit::RateLimitOutcome,
    cache::operations::rate_limit::RateCounterStore,
    config::Config,
    error::CacheError,
    utils::{error_codes, error_to_api_response},
};

/// 固定窗口限流器
///
/// 判定整体委托给存储端的原子自增，进程内不保存计数，
/// 多实例共用同一存储时限流结果一致。窗口边界处最坏可放行
/// 接近两倍上限的请求，这是固定窗口算法的既定取舍。
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateCounterStore>,
    config: Arc<Config>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateCounterStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// 限流判定：允许则计数加一，拒绝时不改动计数
    ///
    /// 存储故障作为错误返回，与拒绝是两种不同的结果，
    /// 调用方据此决定按服务端错误处理还是放行。
    pub async fn admit(&self, client_key: &str) -> Result<RateLimitOutcome, CacheError> {
        self.store
            .incr_within_limit(
                client_key,
                self.config.rate_limit_requests,
                self.config.rate_limit_window_secs,
            )
            .await
    }

    /// 当前窗口计数，仅用于观测，不参与判定
    pub async fn current_count(&self, client_key: &str) -> Result<u32, CacheError> {
        self.store.current_count(client_key).await
    }

    /// 窗口剩余秒数，仅用于观测，不参与判定
    pub async fn remaining_window_secs(
        &self,
        client_key: &str,
    ) -> Result<Option<u64>, CacheError> {
        self.store.remaining_window(client_key).await
    }

    pub async fn check_rate_limit(
        self: Arc<Self>,
        req: Request<Body>,
        next: Next,
    ) -> Result<Response, StatusCode> {
        // 从连接信息获取原始IP
        let remote_ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string());

        // 优先使用反向代理传递的IP，降级使用连接IP
        let ip = req
            .headers()
            .get("x-real-ip")
            .and_then(|h| h.to_str().ok())
            .or_else(|| {
                req.headers()
                    .get("x-forwarded-for")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
            })
            .or_else(|| remote_ip.as_deref())
            .unwrap_or("unknown")
            .trim()
            .to_string();

        match self.admit(&ip).await {
            Ok(RateLimitOutcome::Allowed { count }) => {
                tracing::debug!("Rate limit admit for {}: {} in window", ip, count);
                Ok(next.run(req).await)
            }
            Ok(RateLimitOutcome::Denied) => Ok((
                StatusCode::TOO_MANY_REQUESTS,
                error_to_api_response::<()>(
                    error_codes::RATE_LIMIT,
                    format!(
                        "请求过于频繁，请在{}秒后重试",
                        self.config.rate_limit_window().as_secs()
                    ),
                ),
            )
                .into_response()),
            Err(e) => {
                // 存储故障按服务端错误上报，不能悄悄当成拒绝
                tracing::error!("Rate limit check failed for {}: {}", ip, e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    limiter.check_rate_limit(req, next).await
}
