// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 按希伯来文标签扫描纯文本字段
//!
//! 页面文本形如 `שם המפרסם: משרד הבריאות מועד אחרון להגשה: 14:00 17/12/2025`。
//! 找到标签后取其后第一个冒号之后的文本，并在下一个已知标签处截断。

use crate::domain::models::detail_fields::DetailFields;
use crate::domain::services::date_normalizer::normalize_date;
use crate::utils::text_processing::{clean_html_text, collapse_whitespace};

pub const PUBLISHER_LABEL: &str = "שם המפרסם";
pub const SUBMISSION_START_LABEL: &str = "מועד תחילת ההגשה";
pub const PUBLISH_DATE_LABEL: &str = "תאריך פרסום";
pub const DEADLINE_LABEL: &str = "מועד אחרון להגשה";

/// 其他字段的起始标签，用于截断
pub const STOP_LABELS: &[&str] = &[
    "מס' פרסום",
    "מס׳ פרסום",
    "סטטוס",
    "מס׳ הליך",
    "מס' הליך",
    "תאריך פרסום",
    "תאריך עדכון",
    "מועד תחילת ההגשה",
    "מועד אחרון להגשה",
    "שם המפרסם",
    "פניה למפרסם",
    "מסמכים נלווים",
    "תיאור",
];

/// 表示“未注明”的发布者取值
const UNSPECIFIED: &[&str] = &["לא צויין", "לא צוין"];

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ':' | '-' | '–' | '—')
}

/// 在已清理的文本中读取标签对应的值；找不到时返回空字符串
pub fn field_from_text(text: &str, label: &str) -> String {
    let Some(idx) = text.find(label) else {
        return String::new();
    };
    let tail = &text[idx..];
    let Some(colon) = tail.find(':') else {
        return String::new();
    };

    let mut candidate = &tail[colon + 1..];
    for stop in STOP_LABELS {
        if let Some(p) = candidate.find(stop) {
            candidate = &candidate[..p];
        }
    }
    if let Some(p) = candidate.find('|') {
        candidate = &candidate[..p];
    }

    collapse_whitespace(candidate)
        .trim_matches(is_separator)
        .to_string()
}

/// 校验发布者名称；“未注明”或过短的值视为缺失
pub fn accept_publisher(value: &str) -> String {
    let value = value.trim_matches(is_separator);
    if UNSPECIFIED.contains(&value) || value.chars().count() < 2 {
        return String::new();
    }
    value.to_string()
}

/// 发布者名称
pub fn publisher_from_text(text: &str) -> String {
    accept_publisher(&field_from_text(text, PUBLISHER_LABEL))
}

/// 标签对应的日期，已规范化
pub fn date_from_text(text: &str, label: &str) -> String {
    normalize_date(&field_from_text(text, label))
}

/// 解析详情页的发布者与日期字段
pub fn parse_detail_page(html: &str) -> DetailFields {
    if html.trim().is_empty() {
        return DetailFields::default();
    }
    let text = clean_html_text(html);
    DetailFields {
        publisher: publisher_from_text(&text),
        submission_start: date_from_text(&text, SUBMISSION_START_LABEL),
        publish_date: date_from_text(&text, PUBLISH_DATE_LABEL),
        deadline: date_from_text(&text, DEADLINE_LABEL),
    }
}
