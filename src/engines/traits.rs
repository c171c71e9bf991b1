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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::engines::decoder;

/// 引擎错误类型
///
/// 只在传输层内部使用，对外统一转换为失败的 [`FetchResponse`]。
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// URL 无法解析
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 抓取响应
///
/// `ok` 仅在 2xx 时为真；网络错误、超时或非法 URL 时为 [`FetchResponse::failed`]。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResponse {
    pub ok: bool,
    /// HTTP 状态码，失败时为 0
    pub status: u16,
    /// 声明的 Content-Encoding（原样）
    pub encoding: String,
    /// 未解压的原始响应体
    pub body: Bytes,
}

impl FetchResponse {
    /// 表示“没有数据”的失败响应
    pub fn failed() -> Self {
        Self::default()
    }
}

/// 页面抓取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 发起一次 GET 请求；永不返回错误
    async fn fetch(&self, url: &str) -> FetchResponse;

    /// 抓取器名称
    fn name(&self) -> &'static str;

    /// 抓取并解码为文本；非 2xx 或失败时返回空字符串
    async fn fetch_html(&self, url: &str) -> String {
        let response = self.fetch(url).await;
        if !response.ok {
            return String::new();
        }
        decoder::decode_body(&response.encoding, response.body).await
    }
}
