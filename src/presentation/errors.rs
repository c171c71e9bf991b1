// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::presentation::handlers::json_response;

/// 返回给调用方的通用错误信息；具体原因只写入日志
pub const GENERIC_ERROR_MESSAGE: &str = "שגיאה בשרת בעת משיכת מכרזים";

/// 应用错误类型
///
/// 封装管道层面的意外错误，统一转换为 500 响应
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &json!({ "error": GENERIC_ERROR_MESSAGE }),
        )
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
