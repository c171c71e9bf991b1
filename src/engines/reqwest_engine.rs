// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::FetchSettings;
use crate::engines::traits::{EngineError, FetchResponse, PageFetcher};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 抓取引擎
///
/// 基于 reqwest 的传输层：发送浏览器风格的请求头，返回未解压的原始响应体。
/// 自动解压被关闭，解压由 [`crate::engines::decoder`] 负责。
pub struct ReqwestEngine {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestEngine {
    /// 按配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置（超时、User-Agent、语言）
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 创建成功
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new(settings: &FetchSettings) -> Result<Self, EngineError> {
        let timeout = Duration::from_millis(settings.timeout_ms.max(1));

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("br, gzip, deflate"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&settings.accept_language)
                .map_err(|e| EngineError::Other(format!("Invalid Accept-Language: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .timeout(timeout)
            .no_gzip()
            .no_brotli()
            .no_deflate()
            .build()?;

        Ok(Self { client, timeout })
    }

    /// 执行请求，错误以 [`EngineError`] 返回
    async fn try_fetch(&self, url: &str) -> Result<FetchResponse, EngineError> {
        let parsed = url::Url::parse(url).map_err(|e| EngineError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EngineError::InvalidUrl(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let request = async {
            let response = self.client.get(parsed).send().await?;
            let status = response.status();
            let encoding = response
                .headers()
                .get(reqwest::header::CONTENT_ENCODING)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let body = response.bytes().await?;

            Ok::<_, EngineError>(FetchResponse {
                ok: status.is_success(),
                status: status.as_u16(),
                encoding,
                body,
            })
        };

        // Dropping the future on timeout aborts the in-flight request
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| EngineError::Timeout)?
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 发起 GET 请求
    ///
    /// # 参数
    ///
    /// * `url` - 目标 URL
    ///
    /// # 返回值
    ///
    /// 任何错误都返回 [`FetchResponse::failed`]，调用方将其视为“没有数据”
    async fn fetch(&self, url: &str) -> FetchResponse {
        let start = Instant::now();
        match self.try_fetch(url).await {
            Ok(response) => {
                if !response.ok {
                    warn!(url, status = response.status, "Upstream returned non-success status");
                }
                debug!(
                    url,
                    status = response.status,
                    encoding = %response.encoding,
                    bytes = response.body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Fetched page"
                );
                response
            }
            Err(e) => {
                warn!(url, error = %e, "Fetch failed");
                FetchResponse::failed()
            }
        }
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
