//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

use super::tenant::TENANT_HEADER;

/// 请求日志中间件
///
/// 5xx 响应以 warn 级别记录，其余为 info。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let tenant = header_value(&req, TENANT_HEADER);
    let user_agent = header_value(&req, "user-agent");

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    if status.is_server_error() {
        warn!(
            "{} {} - {} - {}ms - tenant: {:?} - User-Agent: {:?}",
            method,
            uri,
            status,
            duration.as_millis(),
            tenant,
            user_agent
        );
    } else {
        info!(
            "{} {} - {} - {}ms - tenant: {:?} - User-Agent: {:?}",
            method,
            uri,
            status,
            duration.as_millis(),
            tenant,
            user_agent
        );
    }

    response
}

fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}
