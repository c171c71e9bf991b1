// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 马卡比招标卡片抽取（标记分隔）
//!
//! 列表页中每张卡片都以 `class="michrazim-item` 开头；相邻两个标记之间的
//! HTML 视为一张卡片。卡片属性 `data-item-search` 内嵌 JSON，包含 area、
//! topic 与日期字段。

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::settings::MaccabiSettings;
use crate::domain::models::raw_candidate::RawCandidate;
use crate::domain::sources::TenderSource;
use crate::utils::text_processing::{clean_html_text, collapse_whitespace, decode_entities};
use crate::utils::url_utils::absolutize;

const CARD_MARKER: &str = "class=\"michrazim-item";
const DETAILS_PHRASE: &str = "לפרטי הבקשה";
const FALLBACK_TITLE: &str = "מכרז מכבי";

fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)\b{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    ))
    .expect("valid attribute regex")
}

static ITEM_ID: Lazy<Regex> = Lazy::new(|| attr_regex("data-item-id"));
static ITEM_SEARCH: Lazy<Regex> = Lazy::new(|| attr_regex("data-item-search"));
static DATA_AREA: Lazy<Regex> = Lazy::new(|| attr_regex("data-area"));
static DATA_TOPIC: Lazy<Regex> = Lazy::new(|| attr_regex("data-topic"));
static POPOVER: Lazy<Regex> = Lazy::new(|| attr_regex("data-popover-content"));
static REQUEST_URL: Lazy<Regex> = Lazy::new(|| attr_regex("data-request-url"));
static HREF: Lazy<Regex> = Lazy::new(|| attr_regex("href"));
static ARIA_LABEL: Lazy<Regex> = Lazy::new(|| attr_regex("aria-label"));
static H2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h2[^>]*>(.*?)</h2>").expect("valid h2 regex"));
static ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").expect("valid anchor regex"));

/// 读取属性值，缺失时返回空字符串
fn attr(re: &Regex, html: &str) -> String {
    re.captures(html)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// 解析内嵌 JSON；失败或不是对象时返回空对象
fn parse_embedded_json(raw: &str) -> Map<String, Value> {
    let decoded = decode_entities(raw);
    match serde_json::from_str::<Value>(decoded.trim()) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            if !raw.trim().is_empty() {
                debug!("Ignoring malformed data-item-search JSON: {}", e);
            }
            Map::new()
        }
    }
}

/// 按键名顺序取 JSON 中第一个非空的标量值
fn json_text(map: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| match map.get(*key) {
            Some(Value::String(s)) => Some(collapse_whitespace(s)),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// 切分卡片：每个块从标记所在标签的 `<` 开始，到下一个块开始为止
fn split_cards(html: &str) -> Vec<&str> {
    let starts: Vec<usize> = html
        .match_indices(CARD_MARKER)
        .map(|(i, _)| html[..i].rfind('<').unwrap_or(i))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = starts.get(k + 1).copied().unwrap_or(html.len());
            &html[start..end.max(start)]
        })
        .collect()
}

/// 马卡比卡片来源
pub struct MaccabiSource {
    settings: MaccabiSettings,
}

impl MaccabiSource {
    pub fn new(settings: MaccabiSettings) -> Self {
        Self { settings }
    }

    /// “请求详情”文档链接
    fn details_href(&self, block: &str) -> String {
        ANCHOR
            .captures_iter(block)
            .find_map(|caps| {
                let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                let href = attr(&HREF, attrs);
                if href.trim().is_empty() {
                    return None;
                }
                let aria = collapse_whitespace(&decode_entities(&attr(&ARIA_LABEL, attrs)));
                let text = clean_html_text(caps.get(2).map(|m| m.as_str()).unwrap_or(""));
                (aria.contains(DETAILS_PHRASE) || text.contains(DETAILS_PHRASE)).then_some(href)
            })
            .unwrap_or_default()
    }

    /// 解析单张卡片；没有编号且没有链接时返回 `None`
    fn parse_card(&self, block: &str) -> Option<RawCandidate> {
        let item_id = collapse_whitespace(&attr(&ITEM_ID, block));
        let search = parse_embedded_json(&attr(&ITEM_SEARCH, block));

        let mut area = json_text(&search, &["area", "Area"]);
        if area.is_empty() {
            area = collapse_whitespace(&decode_entities(&attr(&DATA_AREA, block)));
        }
        let mut topic = json_text(&search, &["topic", "Topic"]);
        if topic.is_empty() {
            topic = collapse_whitespace(&decode_entities(&attr(&DATA_TOPIC, block)));
        }

        let mut title = collapse_whitespace(&decode_entities(&attr(&POPOVER, block)));
        if title.is_empty() {
            title = H2
                .captures(block)
                .map(|caps| clean_html_text(&caps[1]))
                .unwrap_or_default();
        }
        if title.is_empty() {
            title = FALLBACK_TITLE.to_string();
        }

        let base = &self.settings.base_url;
        let tender_url = absolutize(base, &self.details_href(block))
            .or_else(|| absolutize(base, &decode_entities(&attr(&REQUEST_URL, block))))
            .unwrap_or_else(|| self.settings.listing_url.clone());

        if item_id.is_empty() && tender_url.is_empty() {
            return None;
        }

        let mut candidate = RawCandidate::new(self.name());
        candidate.native_id = item_id;
        candidate.title = title;
        candidate.detail_url = tender_url;
        candidate.set("organization", self.settings.organization.as_str());
        candidate.set(
            "publicationDate",
            json_text(&search, &["publicationDate", "publication_date"]),
        );
        candidate.set("deadline", json_text(&search, &["deadline", "submissionDeadline"]));
        if !area.is_empty() {
            candidate.set("description", format!("תחום: {}", area));
        }
        candidate.set("area", area);
        candidate.set("topic", topic);
        Some(candidate)
    }
}

impl TenderSource for MaccabiSource {
    fn name(&self) -> &'static str {
        "maccabi"
    }

    fn listing_url(&self, _query: &str) -> String {
        self.settings.listing_url.clone()
    }

    fn extract(&self, html: &str) -> Vec<RawCandidate> {
        let cards: Vec<RawCandidate> = split_cards(html)
            .into_iter()
            .filter_map(|block| self.parse_card(block))
            .collect();
        let raw_count = cards.len();

        let in_area: Vec<RawCandidate> = cards
            .into_iter()
            .filter(|c| c.field("area").contains(&self.settings.area_filter))
            .collect();
        let area_count = in_area.len();

        let kept: Vec<RawCandidate> = in_area
            .into_iter()
            .filter(|c| c.field("topic").contains(&self.settings.topic_filter))
            .collect();

        info!(
            raw = raw_count,
            after_area = area_count,
            after_topic = kept.len(),
            area_filter = %self.settings.area_filter,
            topic_filter = %self.settings.topic_filter,
            "Maccabi cards extracted"
        );
        kept
    }
}
