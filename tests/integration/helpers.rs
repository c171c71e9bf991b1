// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::Router;
use tenders_api::config::settings::Settings;
use tenders_api::domain::services::pipeline_service::TenderPipeline;
use tenders_api::engines::reqwest_engine::ReqwestEngine;
use tenders_api::engines::traits::PageFetcher;
use tenders_api::infrastructure::sources::build_pipeline;
use tenders_api::presentation::routes;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/ilgstorefront/he/search/";
pub const LISTING_PATH: &str = "/bids/";
pub const DETAIL_PATTERN: &str = "/ilgstorefront/he/p/";

/// 搜索结果页：两个有效结果、一个重复结果和一个导航链接
pub const MR_SEARCH_HTML: &str = r#"<html><body>
<nav><a href="/he/news/1">חדשות דפוס</a> 01/01/2025 02/01/2025</nav>
<ul>
  <li class="result">
    <a href="/ilgstorefront/he/p/100">הדפסת חוברות הדרכה</a>
    <span>שם המפרסם: משרד החינוך</span>
    <span>01/02/2025</span> <span>15/03/2025</span>
  </li>
  <li class="result">
    <a href="/ilgstorefront/he/p/200">שירותי דיוור</a>
    <span>05/02/2025</span> <span>20/03/2025</span>
  </li>
  <li class="result">
    <a href="/ilgstorefront/he/p/100">הדפסת חוברות הדרכה</a>
    <span>01/02/2025</span> <span>15/03/2025</span>
  </li>
  <li class="result">
    <a href="/ilgstorefront/he/p/300">ניקיון משרדים</a>
    <span>01/02/2025</span> <span>15/03/2025</span>
  </li>
</ul>
</body></html>"#;

/// 详情页：发布者、发布日期、开始日期与截止日期
pub const MR_DETAIL_HTML: &str = r#"<html><body>
<div class="field"><label>מס' פרסום:</label> 4000200</div>
<div class="field"><label>שם המפרסם:</label> רשות הדואר</div>
<div class="field"><label>תאריך פרסום:</label> 03/02/2025</div>
<div class="field"><label>מועד תחילת ההגשה:</label> 09:00, 06/02/2025</div>
<div class="field"><label>מועד אחרון להגשה:</label> 12:00 25/03/2025</div>
</body></html>"#;

fn maccabi_card(id: &str, area: &str, topic: &str, title: &str) -> String {
    let search = format!(
        r#"{{"area":"{}","topic":"{}","publicationDate":"2025-01-10","deadline":"31.01.2025"}}"#,
        area, topic
    );
    format!(
        r#"<div class="michrazim-item" data-item-id="{id}" data-item-search="{search}">
            <h2>{title}</h2>
            <a href="/media/{id}.pdf" aria-label="לפרטי הבקשה">לפרטי הבקשה</a>
        </div>"#,
        id = id,
        search = search.replace('"', "&quot;"),
        title = title
    )
}

/// 卡片列表页：一张通过两个过滤条件，一张 area 不符
pub fn maccabi_html() -> String {
    format!(
        "<html><body><section>{}{}</section></body></html>",
        maccabi_card("501", "משרד, כספים", "בקשות להצעות מחיר/מידע", "הדפסת מעטפות"),
        maccabi_card("502", "רכש", "בקשות להצעות מחיר/מידע", "ציוד רפואי"),
    )
}

/// 指向模拟服务器的配置
pub fn mock_settings(server: &MockServer) -> Settings {
    let uri = server.uri();
    let mut settings = Settings::default();
    settings.fetch.timeout_ms = 2_000;
    settings.enrichment.detail_url_pattern = DETAIL_PATTERN.to_string();
    settings.sources.mr_gov.base_url = uri.clone();
    settings.sources.mr_gov.search_url = format!("{}{}?s=TENDER&text=", uri, SEARCH_PATH);
    settings.sources.maccabi.base_url = uri.clone();
    settings.sources.maccabi.listing_url = format!("{}{}", uri, LISTING_PATH);
    settings
}

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.into())
}

/// 挂载两个列表页；详情页由各测试自行挂载
pub async fn mount_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(html(MR_SEARCH_HTML))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(html(maccabi_html()))
        .mount(server)
        .await;
}

pub fn pipeline_for(settings: &Settings) -> TenderPipeline {
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(ReqwestEngine::new(&settings.fetch).expect("Failed to build fetcher"));
    build_pipeline(settings, fetcher)
}

pub fn app_for(settings: Settings) -> Router {
    let pipeline = Arc::new(pipeline_for(&settings));
    routes::routes(pipeline, Arc::new(settings))
}
