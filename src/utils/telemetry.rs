// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志订阅者
///
/// 默认级别为 `info,tenders_api=debug`，可通过 `RUST_LOG` 覆盖。
/// 重复调用（例如多个测试）不会 panic。
pub fn init_telemetry() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tenders_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
