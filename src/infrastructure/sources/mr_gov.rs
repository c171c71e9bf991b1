// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! MR.gov 搜索结果抽取（链接 + 所在块）
//!
//! 搜索结果页没有稳定的卡片结构，因此遍历所有链接，取链接最近的块级祖先
//! 作为该结果的文本范围。块文本必须包含关键词且至少出现两个日期。

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::info;

use crate::config::settings::MrGovSettings;
use crate::domain::models::raw_candidate::RawCandidate;
use crate::domain::services::labeled_fields::{accept_publisher, field_from_text, PUBLISHER_LABEL};
use crate::domain::sources::TenderSource;
use crate::utils::text_processing::collapse_whitespace;
use crate::utils::url_utils::absolutize;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static LISTING_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{2}/\d{2}/\d{4}\b").expect("valid date regex"));
/// 站点导航类页面
static NAVIGATION_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(lobby|news|register|about|contact|regulations|info)\b")
        .expect("valid navigation regex")
});

const BLOCK_TAGS: &[&str] = &["div", "li", "article", "section", "tr"];

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// 最近的块级祖先；没有时返回链接自身
fn nearest_block(anchor: ElementRef<'_>) -> ElementRef<'_> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| BLOCK_TAGS.contains(&el.value().name()))
        .unwrap_or(anchor)
}

/// 块文本中的发布者；结果行里名称后面紧跟日期，在第一个日期处截断
fn block_publisher(block_text: &str) -> String {
    let value = field_from_text(block_text, PUBLISHER_LABEL);
    let value = match LISTING_DATE.find(&value) {
        Some(m) => &value[..m.start()],
        None => value.as_str(),
    };
    accept_publisher(value)
}

/// MR.gov 关键词搜索来源
pub struct MrGovSource {
    settings: MrGovSettings,
    keywords: Vec<String>,
}

impl MrGovSource {
    pub fn new(settings: MrGovSettings, keywords: Vec<String>) -> Self {
        Self { settings, keywords }
    }

    fn mentions_keyword(&self, text: &str) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|k| text.contains(k.trim()))
    }

    fn parse_anchor(&self, anchor: ElementRef<'_>) -> Option<RawCandidate> {
        let href = anchor.value().attr("href").unwrap_or("").trim();
        let title = element_text(anchor);
        if href.is_empty() || title.is_empty() {
            return None;
        }

        let url = absolutize(&self.settings.base_url, href)?;
        if NAVIGATION_PATH.is_match(&url) {
            return None;
        }

        let block_text = element_text(nearest_block(anchor));
        if !self.mentions_keyword(&block_text) {
            return None;
        }

        let dates: Vec<&str> = LISTING_DATE
            .find_iter(&block_text)
            .map(|m| m.as_str())
            .collect();
        if dates.len() < 2 {
            return None;
        }

        let mut candidate = RawCandidate::new(self.name());
        candidate.title = title;
        candidate.detail_url = url;
        candidate.set("publishDate", dates[0]);
        candidate.set("deadline", dates[dates.len() - 1]);
        candidate.set("organization", block_publisher(&block_text));
        Some(candidate)
    }
}

impl TenderSource for MrGovSource {
    fn name(&self) -> &'static str {
        "mr"
    }

    fn listing_url(&self, query: &str) -> String {
        format!("{}{}", self.settings.search_url, urlencoding::encode(query))
    }

    fn extract(&self, html: &str) -> Vec<RawCandidate> {
        let document = Html::parse_document(html);
        let candidates: Vec<RawCandidate> = document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|anchor| self.parse_anchor(anchor))
            .collect();
        info!("mr: {} candidates from search results", candidates.len());
        candidates
    }
}
