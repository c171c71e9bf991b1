// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 各招标站点的列表抽取实现
pub mod maccabi;
pub mod mr_gov;

use std::sync::Arc;

pub use maccabi::MaccabiSource;
pub use mr_gov::MrGovSource;

use crate::config::settings::Settings;
use crate::domain::services::enrichment_service::EnrichmentPool;
use crate::domain::services::pipeline_service::TenderPipeline;
use crate::domain::sources::TenderSource;
use crate::engines::traits::PageFetcher;

/// 按配置创建来源列表：先 MR.gov 关键词搜索，再马卡比卡片
pub fn configured_sources(settings: &Settings) -> Vec<Arc<dyn TenderSource>> {
    vec![
        Arc::new(MrGovSource::new(
            settings.sources.mr_gov.clone(),
            settings.keywords.default.clone(),
        )),
        Arc::new(MaccabiSource::new(settings.sources.maccabi.clone())),
    ]
}

/// 按配置组装完整的聚合管道
pub fn build_pipeline(settings: &Settings, fetcher: Arc<dyn PageFetcher>) -> TenderPipeline {
    let enrichment = EnrichmentPool::new(Arc::clone(&fetcher), &settings.enrichment);
    TenderPipeline::new(
        fetcher,
        configured_sources(settings),
        enrichment,
        settings.keywords.default.clone(),
    )
}
