// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::domain::models::raw_candidate::RawCandidate;
use crate::domain::models::tender::Tender;
use crate::domain::services::date_normalizer::normalize_date;
use crate::domain::services::enrichment_service::EnrichmentPool;
use crate::domain::services::merge_service::merge_and_dedupe;
use crate::domain::sources::TenderSource;
use crate::engines::traits::PageFetcher;
use crate::utils::text_processing::collapse_whitespace;

static OR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+OR\s+").expect("valid OR regex"));

/// 构建实际使用的搜索词
///
/// `OR` 分隔符替换为空格并合并空白；结果为空时使用默认关键词。
pub fn build_effective_query(query: &str, default_keywords: &[String]) -> String {
    let cleaned = collapse_whitespace(&OR_SEPARATOR.replace_all(query.trim(), " "));
    if !cleaned.is_empty() {
        return cleaned;
    }
    collapse_whitespace(&default_keywords.join(" "))
}

/// 输出前的最终规范化
///
/// 所有日期再经过一次规范化；没有可靠来源的发布日期整个字段移除。
pub fn finalize_tender(mut tender: Tender) -> Tender {
    let publish = normalize_date(tender.publish_date_str());

    tender.submission_start = normalize_date(&tender.submission_start);
    if tender.submission_start.is_empty() {
        tender.submission_start = publish.clone();
    }
    tender.deadline = normalize_date(&tender.deadline);
    tender.publish_date = if tender.publish_date_confirmed && !publish.is_empty() {
        Some(publish)
    } else {
        None
    };
    tender
}

/// 招标聚合管道
///
/// 依次运行各来源抽取，合并去重，补全详情页字段，最后统一规范化。
/// 任一阶段 panic 都被隔离：来源阶段贡献空结果，补全阶段保留补全前的记录。
pub struct TenderPipeline {
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<Arc<dyn TenderSource>>,
    enrichment: EnrichmentPool,
    default_keywords: Vec<String>,
}

impl TenderPipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        sources: Vec<Arc<dyn TenderSource>>,
        enrichment: EnrichmentPool,
        default_keywords: Vec<String>,
    ) -> Self {
        Self {
            fetcher,
            sources,
            enrichment,
            default_keywords,
        }
    }

    pub fn effective_query(&self, query: &str) -> String {
        build_effective_query(query, &self.default_keywords)
    }

    /// 运行一次完整聚合
    ///
    /// # 参数
    ///
    /// * `query` - 调用方提供的搜索词，可为空
    ///
    /// # 返回值
    ///
    /// 规范化后的招标列表；出错时为部分或空列表
    pub async fn run(&self, query: &str) -> Vec<Tender> {
        let effective = self.effective_query(query);
        info!("Effective query: {}", effective);

        let mut collected = Vec::new();
        for source in &self.sources {
            let outcome = AssertUnwindSafe(self.collect_source(source.as_ref(), &effective))
                .catch_unwind()
                .await;
            match outcome {
                Ok(tenders) => collected.extend(tenders),
                Err(_) => error!("Source {} panicked; skipping it", source.name()),
            }
        }

        let merged = merge_and_dedupe(collected);
        let enriched = match AssertUnwindSafe(self.enrichment.enrich(merged.clone()))
            .catch_unwind()
            .await
        {
            Ok(tenders) => tenders,
            Err(_) => {
                error!("Enrichment panicked; returning records without detail fields");
                merged
            }
        };

        let tenders: Vec<Tender> = enriched.into_iter().map(finalize_tender).collect();
        info!("Pipeline produced {} tenders", tenders.len());
        tenders
    }

    async fn collect_source(&self, source: &dyn TenderSource, query: &str) -> Vec<Tender> {
        let url = source.listing_url(query);
        let html = self.fetcher.fetch_html(&url).await;
        if html.is_empty() {
            warn!("{}: no listing data from {}", source.name(), url);
            return Vec::new();
        }

        let tenders: Vec<Tender> = source
            .extract(&html)
            .into_iter()
            .map(RawCandidate::into_tender)
            .filter(|tender| {
                let keep = !tender.tender_url.is_empty();
                if !keep {
                    debug!("{}: dropping {} without an absolute url", source.name(), tender.id);
                }
                keep
            })
            .collect();
        info!("{}: {} tenders", source.name(), tenders.len());
        tenders
    }
}
