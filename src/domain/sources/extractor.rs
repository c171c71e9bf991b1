// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::raw_candidate::RawCandidate;

/// 招标来源（每个上游网站一个实现）
///
/// 抽取是同步的：只解析已解码的 HTML，不做任何网络请求。
/// 实现必须容忍缺失属性、损坏的内嵌 JSON 和空文档。
pub trait TenderSource: Send + Sync {
    /// 来源名称，同时用作记录编号前缀
    fn name(&self) -> &'static str;

    /// 本次运行要抓取的列表页地址
    ///
    /// `query` 为已规范化的搜索词，不使用搜索的来源可以忽略它。
    fn listing_url(&self, query: &str) -> String;

    /// 从列表页 HTML 中抽取候选记录
    fn extract(&self, html: &str) -> Vec<RawCandidate>;
}
