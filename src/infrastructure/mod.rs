// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含各上游站点的抽取实现（sources）以及按配置组装管道的入口。
/// 站点的标记类名、属性名与字段标签只在这里出现。
pub mod sources;
