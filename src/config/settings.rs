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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 详情页补全配置
    pub enrichment: EnrichmentSettings,
    /// 关键词配置
    pub keywords: KeywordSettings,
    /// 数据来源配置
    pub sources: SourcesSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 单次请求超时时间（毫秒）
    pub timeout_ms: u64,
    /// 浏览器 User-Agent
    pub user_agent: String,
    /// Accept-Language 请求头
    pub accept_language: String,
}

/// 详情页补全配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentSettings {
    /// 同时进行的详情页请求数
    pub concurrency: usize,
    /// 需要补全的详情页 URL 片段
    pub detail_url_pattern: String,
}

/// 关键词配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordSettings {
    /// 默认的印刷行业关键词
    pub default: Vec<String>,
}

/// 数据来源配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesSettings {
    pub mr_gov: MrGovSettings,
    pub maccabi: MaccabiSettings,
}

/// MR.gov 关键词搜索来源
#[derive(Debug, Clone, Deserialize)]
pub struct MrGovSettings {
    /// 用于补全相对链接的站点根地址
    pub base_url: String,
    /// 搜索地址，查询词直接追加在末尾
    pub search_url: String,
}

/// 马卡比卡片列表来源
#[derive(Debug, Clone, Deserialize)]
pub struct MaccabiSettings {
    pub base_url: String,
    pub listing_url: String,
    /// area 标签必须包含的文本
    pub area_filter: String,
    /// topic 标签必须包含的文本
    pub topic_filter: String,
    /// 固定的发布机构名称
    pub organization: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8787,
            },
            fetch: FetchSettings {
                timeout_ms: 12_000,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                accept_language: "he,en;q=0.9".to_string(),
            },
            enrichment: EnrichmentSettings {
                concurrency: 4,
                detail_url_pattern: "mr.gov.il/ilgstorefront".to_string(),
            },
            keywords: KeywordSettings {
                default: ["דפוס", "הדפסה", "דפס", "דיוור", "עיטוף", "מעטפות"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            sources: SourcesSettings {
                mr_gov: MrGovSettings {
                    base_url: "https://www.mr.gov.il".to_string(),
                    search_url: "https://www.mr.gov.il/ilgstorefront/he/search/?q=%3AupdateDate%3Aarchive%3Afalse&s=TENDER&text=".to_string(),
                },
                maccabi: MaccabiSettings {
                    base_url: "https://www.maccabi4u.co.il".to_string(),
                    listing_url: "https://www.maccabi4u.co.il/bids/".to_string(),
                    area_filter: "משרד".to_string(),
                    topic_filter: "בקשות להצעות מחיר/מידע".to_string(),
                    organization: "מכבי שירותי בריאות".to_string(),
                },
            },
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 以 [`Settings::default`] 为基础，依次叠加 `config/default`、
    /// `config/{APP_ENVIRONMENT}` 文件和 `TENDERS__*` 环境变量。
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let defaults = Settings::default();

        let builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("fetch.timeout_ms", defaults.fetch.timeout_ms as i64)?
            .set_default("fetch.user_agent", defaults.fetch.user_agent)?
            .set_default("fetch.accept_language", defaults.fetch.accept_language)?
            .set_default("enrichment.concurrency", defaults.enrichment.concurrency as i64)?
            .set_default(
                "enrichment.detail_url_pattern",
                defaults.enrichment.detail_url_pattern,
            )?
            .set_default("keywords.default", defaults.keywords.default)?
            .set_default("sources.mr_gov.base_url", defaults.sources.mr_gov.base_url)?
            .set_default("sources.mr_gov.search_url", defaults.sources.mr_gov.search_url)?
            .set_default("sources.maccabi.base_url", defaults.sources.maccabi.base_url)?
            .set_default(
                "sources.maccabi.listing_url",
                defaults.sources.maccabi.listing_url,
            )?
            .set_default(
                "sources.maccabi.area_filter",
                defaults.sources.maccabi.area_filter,
            )?
            .set_default(
                "sources.maccabi.topic_filter",
                defaults.sources.maccabi.topic_filter,
            )?
            .set_default(
                "sources.maccabi.organization",
                defaults.sources.maccabi.organization,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("TENDERS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("keywords.default")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
