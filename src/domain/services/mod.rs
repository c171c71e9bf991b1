// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 日期规范化（date_normalizer）：任意日期文本转为 `DD/MM/YYYY`
/// - 标签字段（labeled_fields）：按希伯来文标签扫描页面文本
/// - 合并去重（merge_service）：跨来源合并并保证键唯一
/// - 详情页补全（enrichment_service）：有界并发抓取详情页并回填字段
/// - 聚合管道（pipeline_service）：串联抽取、合并、补全与最终规范化
pub mod date_normalizer;
pub mod enrichment_service;
pub mod labeled_fields;
pub mod merge_service;
pub mod pipeline_service;
