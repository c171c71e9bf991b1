// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 详情页补全
//!
//! 对 URL 命中详情页模式的记录抓取详情页，回填发布者与日期字段。
//! 固定数量的工作任务共享一个原子游标，按下标顺序领取记录，结果写回原下标，
//! 因此输出顺序与输入一致。同一 URL 在一次运行中最多抓取一次。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::config::settings::EnrichmentSettings;
use crate::domain::models::detail_fields::DetailFields;
use crate::domain::models::tender::Tender;
use crate::domain::services::date_normalizer::normalize_date;
use crate::domain::services::labeled_fields::parse_detail_page;
use crate::engines::traits::PageFetcher;

/// 单次运行内的详情页缓存（URL -> 字段）
///
/// 每个 URL 对应一个 [`OnceCell`]，并发请求同一 URL 时只有一个真正发起抓取。
#[derive(Default)]
pub struct EnrichmentCache {
    entries: DashMap<String, Arc<OnceCell<DetailFields>>>,
}

impl EnrichmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// 读取缓存，未命中时抓取并解析详情页
    pub async fn get_or_fetch(&self, url: &str, fetcher: &dyn PageFetcher) -> DetailFields {
        let cell = self
            .entries
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if cell.initialized() {
            debug!("Detail cache hit: {}", url);
        }

        cell.get_or_init(|| async {
            let html = fetcher.fetch_html(url).await;
            let fields = parse_detail_page(&html);
            if fields.is_empty() {
                debug!("No detail fields recovered from {}", url);
            }
            fields
        })
        .await
        .clone()
    }
}

/// 按优先级合并详情页字段
///
/// 投标开始日期：详情页开始日期 > 详情页发布日期 > 记录已有值 > 记录的发布日期。
/// 截止日期优先保留记录已有值。详情页没有任何字段时记录原样返回。
pub fn apply_detail_fields(mut tender: Tender, fields: &DetailFields) -> Tender {
    if fields.is_empty() {
        return tender;
    }

    if tender.organization.trim().is_empty() {
        tender.organization = fields.publisher.clone();
    }

    let current_start = normalize_date(&tender.submission_start);
    let current_publish = normalize_date(tender.publish_date_str());
    tender.submission_start = [
        fields.submission_start.as_str(),
        fields.publish_date.as_str(),
        current_start.as_str(),
        current_publish.as_str(),
    ]
    .into_iter()
    .find(|value| !value.is_empty())
    .unwrap_or_default()
    .to_string();

    if !tender.publish_date_confirmed && !fields.publish_date.is_empty() {
        tender.publish_date = Some(fields.publish_date.clone());
        tender.publish_date_confirmed = true;
    }

    let current_deadline = normalize_date(&tender.deadline);
    tender.deadline = if current_deadline.is_empty() {
        fields.deadline.clone()
    } else {
        current_deadline
    };

    tender
}

/// 有界并发的详情页补全池
pub struct EnrichmentPool {
    fetcher: Arc<dyn PageFetcher>,
    concurrency: usize,
    detail_url_pattern: String,
}

impl EnrichmentPool {
    pub fn new(fetcher: Arc<dyn PageFetcher>, settings: &EnrichmentSettings) -> Self {
        Self {
            fetcher,
            concurrency: settings.concurrency.max(1),
            detail_url_pattern: settings.detail_url_pattern.clone(),
        }
    }

    /// 记录的 URL 是否指向可补全的详情页
    pub fn is_eligible(&self, tender: &Tender) -> bool {
        let url = tender.tender_url.trim();
        !url.is_empty() && url.contains(&self.detail_url_pattern)
    }

    /// 使用全新的缓存补全记录
    pub async fn enrich(&self, tenders: Vec<Tender>) -> Vec<Tender> {
        self.enrich_with_cache(tenders, Arc::new(EnrichmentCache::new()))
            .await
    }

    /// 使用给定缓存补全记录
    ///
    /// 工作任务 panic 时，它正在处理的记录保持原样，其余记录由其他任务继续处理。
    pub async fn enrich_with_cache(
        &self,
        tenders: Vec<Tender>,
        cache: Arc<EnrichmentCache>,
    ) -> Vec<Tender> {
        let total = tenders.len();
        let eligible = tenders.iter().filter(|t| self.is_eligible(t)).count();
        if eligible == 0 {
            return tenders;
        }

        let slots = Arc::new(Mutex::new(tenders));
        let cursor = Arc::new(AtomicUsize::new(0));
        let workers = self.concurrency.min(total);

        let mut tasks = JoinSet::new();
        for _ in 0..workers {
            let slots = Arc::clone(&slots);
            let cursor = Arc::clone(&cursor);
            let cache = Arc::clone(&cache);
            let fetcher = Arc::clone(&self.fetcher);
            let pattern = self.detail_url_pattern.clone();

            tasks.spawn(async move {
                loop {
                    let idx = cursor.fetch_add(1, Ordering::SeqCst);
                    if idx >= total {
                        break;
                    }

                    let tender = slots.lock().unwrap_or_else(PoisonError::into_inner)[idx].clone();
                    let url = tender.tender_url.trim().to_string();
                    if url.is_empty() || !url.contains(&pattern) {
                        continue;
                    }

                    let fields = cache.get_or_fetch(&url, fetcher.as_ref()).await;
                    let enriched = apply_detail_fields(tender, &fields);
                    slots.lock().unwrap_or_else(PoisonError::into_inner)[idx] = enriched;
                }
            });
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("Enrichment worker failed: {}", e);
            }
        }

        info!(
            "Enriched {} eligible records using {} detail pages",
            eligible,
            cache.len()
        );

        let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *slots)
    }
}

#[cfg(test)]
#[path = "enrichment_service_test.rs"]
mod tests;
