use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, info};

/// 记录每个请求的处理结果与耗时
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed();
    if response.status().is_server_error() {
        error!("{} {} -> {} ({:?})", method, path, response.status(), elapsed);
    } else {
        info!("{} {} -> {} ({:?})", method, path, response.status(), elapsed);
    }

    response
}
