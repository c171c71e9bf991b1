// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 日期规范化
//!
//! 所有来源、补全阶段与最终输出都通过 [`normalize_date`] 把日期统一为
//! `DD/MM/YYYY`。无法解析或超出范围的输入一律返回空字符串。

use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD`、`YYYY/MM/DD`、`YYYY.MM.DD`
static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(\d{4})[-./](\d{1,2})[-./](\d{1,2})(?:\D|$)").expect("valid regex")
});

/// `DD/MM/YYYY`、`D.M.YYYY`、`DD-MM-YY`
static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\D)(\d{1,2})[-./](\d{1,2})[-./](\d{2,4})(?:\D|$)").expect("valid regex")
});

/// 将任意日期字符串规范化为 `DD/MM/YYYY`
///
/// 先尝试年在前的格式，再尝试日在前的格式；两位年份加 2000。
/// 字符串中的时间部分（如 `08:00, 08/01/2026`）会被忽略。
pub fn normalize_date(value: &str) -> String {
    let s = value.trim();
    if s.is_empty() {
        return String::new();
    }

    if let Some(caps) = YEAR_FIRST.captures(s) {
        if let Some(out) = validated(&caps[3], &caps[2], &caps[1]) {
            return out;
        }
    }

    if let Some(caps) = DAY_FIRST.captures(s) {
        if let Some(out) = validated(&caps[1], &caps[2], &caps[3]) {
            return out;
        }
    }

    String::new()
}

fn validated(day: &str, month: &str, year: &str) -> Option<String> {
    let dd: u32 = day.parse().ok()?;
    let mm: u32 = month.parse().ok()?;
    let mut yyyy: u32 = year.parse().ok()?;
    if year.len() <= 2 {
        yyyy += 2000;
    }

    if !(1..=31).contains(&dd) || !(1..=12).contains(&mm) || !(1900..=2100).contains(&yyyy) {
        return None;
    }

    Some(format!("{:02}/{:02}/{:04}", dd, mm, yyyy))
}
