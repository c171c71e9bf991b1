// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::services::pipeline_service::TenderPipeline;
use crate::presentation::errors::AppError;
use crate::presentation::handlers::json_response;

/// `/api/tenders` 的查询参数
#[derive(Debug, Default, Deserialize)]
pub struct TendersQuery {
    /// 自由文本搜索词；缺省时使用默认关键词
    #[serde(default)]
    pub q: String,
}

/// 实时抓取并返回招标列表
///
/// 管道在独立任务中运行；任务异常结束时返回 500。无法解析的查询串返回
/// JSON 格式的 400。
///
/// # 参数
///
/// * `pipeline` - 聚合管道
/// * `params` - 查询参数
///
/// # 返回值
///
/// 招标记录的 JSON 数组
pub async fn list_tenders(
    Extension(pipeline): Extension<Arc<TenderPipeline>>,
    query: Result<Query<TendersQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!("Rejected query string: {}", rejection.body_text());
            return Ok(json_response(
                rejection.status(),
                &json!({ "error": rejection.body_text() }),
            ));
        }
    };
    info!("Incoming query: {:?}", params.q);

    let tenders = tokio::spawn(async move { pipeline.run(&params.q).await })
        .await
        .context("tender pipeline task failed")?;

    Ok(json_response(StatusCode::OK, &tenders))
}
