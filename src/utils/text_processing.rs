// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! HTML 文本清理工具
//!
//! 各个来源的抽取器与详情页解析共用这些函数，保证标题、正文的清理方式一致。

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// 解码 HTML 实体（含 `&nbsp;`、数字实体）
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    html_escape::decode_html_entities(input).replace('\u{a0}', " ")
}

/// 将所有标签替换为空格
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, " ").into_owned()
}

/// 合并连续空白并去除首尾空白
pub fn collapse_whitespace(input: &str) -> String {
    WS_RE.replace_all(input, " ").trim().to_string()
}

/// 标签剥离 + 实体解码 + 空白合并
pub fn clean_html_text(input: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(input)))
}
