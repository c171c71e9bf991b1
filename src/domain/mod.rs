// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：招标记录、候选记录与详情字段
/// - 来源接口（sources）：各站点抽取器的统一抽象
/// - 服务（services）：规范化、合并、补全与聚合管道
///
/// 领域层只依赖抓取特质，不依赖具体的传输实现。
pub mod models;
pub mod services;
pub mod sources;
