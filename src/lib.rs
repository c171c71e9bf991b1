// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 招标模型、来源接口以及规范化、合并、补全与聚合服务
pub mod domain;

/// 引擎模块
///
/// 页面抓取与响应体解码
pub mod engines;

/// 基础设施模块
///
/// 各上游站点的抽取实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
