// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::Response};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

use crate::config::settings::Settings;
use crate::presentation::handlers::json_response;

pub const SERVICE_NAME: &str = "tenders-api";

/// 健康检查端点
///
/// # 返回值
///
/// `{"ok": true, "service", "port", "time"}`，时间为 ISO 8601
pub async fn health(Extension(settings): Extension<Arc<Settings>>) -> Response {
    json_response(
        StatusCode::OK,
        &json!({
            "ok": true,
            "service": SERVICE_NAME,
            "port": settings.server.port,
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}
