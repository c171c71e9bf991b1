// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 招标记录（tender）：管道输出的规范记录与处理状态
/// - 候选记录（raw_candidate）：抽取阶段的原始字段集合
/// - 详情字段（detail_fields）：详情页补全得到的字段
pub mod detail_fields;
pub mod raw_candidate;
pub mod tender;
