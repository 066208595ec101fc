use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use secretlink_backend::{
    AppState,
    cache::{RedisRateLimitStore, RedisSecretStore},
    config::Config,
    middleware::{RateLimiter, log_requests, rate_limit},
    routes,
    vault::SecretVault,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置 Redis 客户端
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let redis_arc = Arc::new(redis_client);

    // 设置保管库与限流器，可变状态全部留在 Redis
    let vault = SecretVault::new(Arc::new(RedisSecretStore::new(redis_arc.clone())));
    let rate_limiter = Arc::new(RateLimiter::new(
        Arc::new(RedisRateLimitStore::new(redis_arc.clone())),
        config.clone(),
    ));

    // 设置应用状态
    let state = AppState {
        config: config.clone(),
        vault,
    };

    // 秘密相关路由与健康检查
    let api_routes = Router::new()
        .route("/secrets/create", post(routes::secret::create_secret))
        .route("/secrets/consume", post(routes::secret::consume_secret))
        .route("/secrets/exists", get(routes::secret::check_secret_exists))
        .route("/system/ping", get(routes::system::ping));

    // 创建基础路由
    let router = Router::new().nest(&config.api_base_uri.clone(), api_routes);

    // 添加日志中间件和限流中间件
    let router = router.layer(axum::middleware::from_fn(log_requests)).layer(
        axum::middleware::from_fn_with_state(rate_limiter, rate_limit),
    );

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        // 设置开发环境的CORS，允许所有来源
        let cors = CorsLayer::permissive();
        router.layer(cors)
    };

    // 添加应用状态
    let app = router.with_state(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
