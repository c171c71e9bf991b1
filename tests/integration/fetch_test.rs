// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::io::Write;
use std::time::Duration;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use tenders_api::config::settings::Settings;
use tenders_api::engines::reqwest_engine::ReqwestEngine;
use tenders_api::engines::traits::PageFetcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><body>מכרז לשירותי דפוס</body></html>";

fn engine(timeout_ms: u64) -> ReqwestEngine {
    let mut settings = Settings::default().fetch;
    settings.timeout_ms = timeout_ms;
    ReqwestEngine::new(&settings).expect("Failed to build engine")
}

fn compressed(encoding: &str) -> Vec<u8> {
    match encoding {
        "gzip" => {
            let mut e = GzEncoder::new(Vec::new(), Compression::default());
            e.write_all(PAGE.as_bytes()).unwrap();
            e.finish().unwrap()
        }
        "deflate" => {
            let mut e = ZlibEncoder::new(Vec::new(), Compression::default());
            e.write_all(PAGE.as_bytes()).unwrap();
            e.finish().unwrap()
        }
        _ => PAGE.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn test_compressed_bodies_are_decoded() {
    let server = MockServer::start().await;
    for encoding in ["gzip", "deflate"] {
        Mock::given(method("GET"))
            .and(path(format!("/{}", encoding)))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-encoding", encoding)
                    .set_body_bytes(compressed(encoding)),
            )
            .mount(&server)
            .await;
    }

    let engine = engine(2_000);
    for encoding in ["gzip", "deflate"] {
        let url = format!("{}/{}", server.uri(), encoding);
        let response = engine.fetch(&url).await;
        assert!(response.ok);
        assert_eq!(response.encoding, encoding);
        assert_eq!(engine.fetch_html(&url).await, PAGE);
    }
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings::default().fetch;
    let html = engine(2_000).fetch_html(&format!("{}/page", server.uri())).await;
    assert_eq!(html, PAGE);

    let requests = server.received_requests().await.expect("Request recording enabled");
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    let raw = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.as_str().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.last().as_str().to_string())
            .unwrap_or_default()
    };
    assert_eq!(raw("accept-language"), settings.accept_language);
    assert_eq!(raw("user-agent"), settings.user_agent);
    assert_eq!(raw("accept-encoding"), "br, gzip, deflate");
    assert!(raw("accept").starts_with("text/html"));
}

#[tokio::test]
async fn test_non_success_status_is_not_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let engine = engine(2_000);
    let url = format!("{}/missing", server.uri());
    let response = engine.fetch(&url).await;
    assert!(!response.ok);
    assert_eq!(response.status, 404);
    assert_eq!(engine.fetch_html(&url).await, "");
}

#[tokio::test]
async fn test_slow_upstream_times_out_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let response = engine(200).fetch(&format!("{}/slow", server.uri())).await;
    assert!(!response.ok);
    assert_eq!(response.status, 0);
    assert!(response.body.is_empty());
}
