pub mod handlers;

pub use handlers::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// 构建路由
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/scan", post(scan).fallback(method_not_allowed))
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(max_body_bytes)))
        .with_state(state)
}
