// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use tenders_api::config::settings::Settings;
use tenders_api::engines::reqwest_engine::ReqwestEngine;
use tenders_api::engines::traits::PageFetcher;
use tenders_api::infrastructure::sources::build_pipeline;
use tenders_api::presentation::routes;
use tenders_api::utils::telemetry;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting tenders-api...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Build the fetcher and pipeline
    let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestEngine::new(&settings.fetch)?);
    let pipeline = Arc::new(build_pipeline(&settings, fetcher));
    info!(
        "Pipeline ready (enrichment concurrency {})",
        settings.enrichment.concurrency
    );

    // 4. Start HTTP server
    let app = routes::routes(pipeline, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
