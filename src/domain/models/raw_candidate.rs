// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

use crate::domain::models::tender::{Tender, TenderStatus};
use crate::domain::services::date_normalizer::normalize_date;
use crate::utils::text_processing::collapse_whitespace;
use crate::utils::url_utils::{is_absolute_http, stable_hash};

/// 发布机构的字段别名（按优先级）
pub const ORGANIZATION_ALIASES: &[&str] = &["organization", "publisher", "org", "שם המפרסם"];

/// 投标开始日期的字段别名；列表页的发布日期作为兼容兜底
pub const SUBMISSION_START_ALIASES: &[&str] = &[
    "submissionStart",
    "submission_start",
    "submissionStartDate",
    "startDate",
    "start_date",
    "publishDate",
    "publicationDate",
];

/// 截止日期的字段别名
pub const DEADLINE_ALIASES: &[&str] = &[
    "deadline",
    "submissionDeadline",
    "lastDate",
    "closeDate",
    "מועד אחרון להגשה",
];

/// 列表页上出现的发布日期（可能是启发式猜测）
pub const LISTING_PUBLISH_ALIASES: &[&str] = &["publishDate", "publicationDate", "publication_date"];

/// 明确标注为发布日期的字段；`publishDate` 不在其中
pub const CONFIRMED_PUBLISH_ALIASES: &[&str] = &[
    "realPublishDate",
    "publishDateReal",
    "publish_date",
    "publicationDate",
    "publication_date",
    "datePublished",
    "publishedAt",
    "published_at",
    "תאריך פרסום",
];

/// 抽取阶段产生的未规范化候选记录
///
/// 字段名随来源而变化，只在 [`RawCandidate::into_tender`] 中按别名表解析。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    /// 来源名称，用作 id 前缀
    pub source: String,
    /// 来源自带的编号（可能为空）
    pub native_id: String,
    pub title: String,
    pub detail_url: String,
    /// 原始字段，键为来源的字段名
    pub fields: BTreeMap<String, String>,
}

impl RawCandidate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// 写入一个字段；空值不写入
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        if !value.is_empty() {
            self.fields.insert(key.to_string(), value.to_string());
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// 读取字段，不存在时返回空字符串
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// 按别名顺序取第一个非空值
    pub fn first_of(&self, aliases: &[&str]) -> &str {
        aliases
            .iter()
            .map(|alias| self.field(alias))
            .find(|value| !value.trim().is_empty())
            .unwrap_or("")
    }

    /// 按别名顺序取第一个能规范化的日期
    fn first_date_of(&self, aliases: &[&str]) -> String {
        aliases
            .iter()
            .map(|alias| normalize_date(self.field(alias)))
            .find(|date| !date.is_empty())
            .unwrap_or_default()
    }

    /// 稳定的记录编号：优先来源编号，否则为详情链接的哈希
    pub fn stable_id(&self) -> String {
        let native = self.native_id.trim();
        if !native.is_empty() {
            return format!("{}-{}", self.source, native);
        }
        format!("{}-{}", self.source, stable_hash(&self.detail_url, 16))
    }

    /// 映射为规范的 [`Tender`]
    pub fn into_tender(self) -> Tender {
        let confirmed_publish = self.first_date_of(CONFIRMED_PUBLISH_ALIASES);
        let listing_publish = self.first_date_of(LISTING_PUBLISH_ALIASES);
        let publish_date_confirmed = !confirmed_publish.is_empty();
        let publish_date = if publish_date_confirmed {
            Some(confirmed_publish)
        } else if !listing_publish.is_empty() {
            Some(listing_publish)
        } else {
            None
        };

        let tender_url = self.detail_url.trim();
        let tender_url = if is_absolute_http(tender_url) {
            tender_url.to_string()
        } else {
            String::new()
        };

        Tender {
            id: self.stable_id(),
            title: collapse_whitespace(&self.title),
            organization: collapse_whitespace(self.first_of(ORGANIZATION_ALIASES)),
            submission_start: self.first_date_of(SUBMISSION_START_ALIASES),
            publish_date,
            deadline: self.first_date_of(DEADLINE_ALIASES),
            status: TenderStatus::default(),
            description: collapse_whitespace(self.field("description")),
            tender_url,
            publish_date_confirmed,
        }
    }
}
