//! HTTP中间件配置

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{header, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::time::{Duration, Instant};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{info, warn};

use super::models::ErrorBody;
use super::state::AppState;

/// Slack on top of the execution deadline, so a timed out command still
/// gets its own error body instead of a bare 408.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

/// 创建中间件栈
pub fn create_middleware_stack(
    execution_timeout: Duration,
) -> tower::layer::util::Stack<CorsLayer, TimeoutLayer> {
    tower::layer::util::Stack::new(
        create_cors_layer(),
        create_timeout_layer(execution_timeout),
    )
}

/// 创建CORS中间件 - 允许任意来源
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

fn create_timeout_layer(execution_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::new(execution_timeout + REQUEST_TIMEOUT_SLACK)
}

/// Stamps the request path into error bodies produced by handlers.
pub async fn error_envelope(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut response = next.run(req).await;

    match response.extensions_mut().remove::<ErrorBody>() {
        Some(body) => {
            let status = response.status();
            (status, Json(ErrorBody { path, ..body })).into_response()
        }
        None => response,
    }
}

/// 请求日志中间件（同时更新服务器统计）
pub async fn request_logger(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let endpoint = match req.extensions().get::<MatchedPath>() {
        Some(matched) => format!("{method} {}", matched.as_str()),
        None => format!("{method} {}", uri.path()),
    };
    let start = Instant::now();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let failed = status.is_client_error() || status.is_server_error();

    if let Ok(mut stats) = state.stats.write() {
        stats.record(&endpoint, failed);
    }

    if failed {
        warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}
