//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping           GET   健康检查
//! - /api/pipeline/run   POST  执行一次文档转语音管线

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/pipeline/run", post(handlers::run_pipeline))
}
