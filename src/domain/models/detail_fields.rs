// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 从详情页抽取到的字段（补全缓存条目）
///
/// 各字段可能为空；日期已规范化为 `DD/MM/YYYY`。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub publisher: String,
    pub submission_start: String,
    pub publish_date: String,
    pub deadline: String,
}

impl DetailFields {
    pub fn is_empty(&self) -> bool {
        self.publisher.is_empty()
            && self.submission_start.is_empty()
            && self.publish_date.is_empty()
            && self.deadline.is_empty()
    }
}
