pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// 构建路由：竞价入口只接受 POST，其它方法返回 405
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::handle_bid_request).fallback(response::method_not_allowed),
        )
        .route(
            "/openrtb",
            post(handlers::handle_bid_request).fallback(response::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
