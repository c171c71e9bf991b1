// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::config::settings::Settings;
use crate::domain::services::pipeline_service::TenderPipeline;
use crate::presentation::handlers::{health_handler, method_not_allowed, not_found, tenders_handler};
use crate::presentation::middleware::cors_middleware::cors_middleware;

/// 创建应用路由
///
/// # 参数
///
/// * `pipeline` - 聚合管道
/// * `settings` - 应用配置
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(pipeline: Arc<TenderPipeline>, settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/health", get(health_handler::health))
        .route("/api/tenders", get(tenders_handler::list_tenders))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(axum::middleware::from_fn(cors_middleware))
        .layer(Extension(pipeline))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}
