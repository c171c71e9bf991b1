// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tenders_api::domain::models::tender::TenderStatus;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{html, mock_settings, mount_listings, pipeline_for, MR_DETAIL_HTML, SEARCH_PATH};

/// 完整管道：两个来源、去重、详情页补全与最终规范化
#[tokio::test]
async fn test_pipeline_merges_enriches_and_normalizes() {
    let server = MockServer::start().await;
    mount_listings(&server).await;
    Mock::given(method("GET"))
        .and(path("/ilgstorefront/he/p/200"))
        .respond_with(html(MR_DETAIL_HTML))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ilgstorefront/he/p/100"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let settings = mock_settings(&server);
    let uri = server.uri();
    let tenders = pipeline_for(&settings).run("").await;

    assert_eq!(tenders.len(), 3);

    let first = &tenders[0];
    assert!(first.id.starts_with("mr-"));
    assert_eq!(first.title, "הדפסת חוברות הדרכה");
    assert_eq!(first.tender_url, format!("{}/ilgstorefront/he/p/100", uri));
    assert_eq!(first.organization, "משרד החינוך");
    assert_eq!(first.submission_start, "01/02/2025");
    assert_eq!(first.deadline, "15/03/2025");
    assert_eq!(first.publish_date, None);
    assert_eq!(first.status, TenderStatus::NotYetProcessed);

    let second = &tenders[1];
    assert_eq!(second.tender_url, format!("{}/ilgstorefront/he/p/200", uri));
    assert_eq!(second.organization, "רשות הדואר");
    assert_eq!(second.submission_start, "06/02/2025");
    assert_eq!(second.publish_date.as_deref(), Some("03/02/2025"));
    assert_eq!(second.deadline, "20/03/2025");

    let third = &tenders[2];
    assert_eq!(third.id, "maccabi-501");
    assert_eq!(third.title, "הדפסת מעטפות");
    assert_eq!(third.organization, "מכבי שירותי בריאות");
    assert_eq!(third.description, "תחום: משרד, כספים");
    assert_eq!(third.tender_url, format!("{}/media/501.pdf", uri));
    assert_eq!(third.publish_date.as_deref(), Some("10/01/2025"));
    assert_eq!(third.submission_start, "10/01/2025");
    assert_eq!(third.deadline, "31/01/2025");

    let ids: std::collections::HashSet<&str> = tenders.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids.len(), tenders.len());
}

/// 搜索词经过清理后附加到搜索地址
#[tokio::test]
async fn test_effective_query_reaches_search_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("text", "דפוס מעטפות"))
        .respond_with(html("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = mock_settings(&server);
    let tenders = pipeline_for(&settings).run("  דפוס OR מעטפות ").await;
    assert!(tenders.is_empty());
}

/// 一个来源失败不影响其他来源
#[tokio::test]
async fn test_failing_source_does_not_abort_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bids/"))
        .respond_with(html(super::helpers::maccabi_html()))
        .mount(&server)
        .await;

    let settings = mock_settings(&server);
    let tenders = pipeline_for(&settings).run("").await;

    assert_eq!(tenders.len(), 1);
    assert_eq!(tenders[0].id, "maccabi-501");
}

/// 相同的上游内容两次运行得到完全相同的 JSON
#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let server = MockServer::start().await;
    mount_listings(&server).await;
    Mock::given(method("GET"))
        .and(path("/ilgstorefront/he/p/200"))
        .respond_with(html(MR_DETAIL_HTML))
        .expect(2)
        .mount(&server)
        .await;

    let settings = mock_settings(&server);
    let pipeline = pipeline_for(&settings);

    let first = serde_json::to_string(&pipeline.run("").await).unwrap();
    let second = serde_json::to_string(&pipeline.run("").await).unwrap();
    assert_eq!(first, second);
    assert!(!first.contains("publishDateConfirmed"));
}
