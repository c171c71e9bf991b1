// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use tower::util::ServiceExt;
use wiremock::MockServer;

use super::helpers::{app_for, mock_settings, mount_listings};

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn assert_json_utf8(response: &Response) {
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json; charset=utf-8"
    );
}

/// 健康检查端点
#[tokio::test]
async fn health_check_works() {
    let server = MockServer::start().await;
    let settings = mock_settings(&server);
    let port = settings.server.port;

    let response = app_for(settings).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_json_utf8(&response);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "tenders-api");
    assert_eq!(body["port"], port);
    assert!(chrono::DateTime::parse_from_rfc3339(body["time"].as_str().unwrap()).is_ok());
}

/// 没有搜索词时返回 JSON 数组
#[tokio::test]
async fn tenders_without_query_returns_array() {
    let server = MockServer::start().await;
    mount_listings(&server).await;

    let response = app_for(mock_settings(&server))
        .oneshot(get("/api/tenders?q="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_json_utf8(&response);
    let body = json_body(response).await;
    let tenders = body.as_array().unwrap();
    assert_eq!(tenders.len(), 3);
    assert_eq!(tenders[2]["id"], "maccabi-501");
    assert_eq!(tenders[2]["status"], "טרם טופל");
    assert!(tenders[0].get("publishDate").is_none());
}

/// 上游全部不可用时返回空数组而不是错误
#[tokio::test]
async fn tenders_with_unavailable_upstreams_returns_empty_array() {
    let server = MockServer::start().await;

    let response = app_for(mock_settings(&server))
        .oneshot(get("/api/tenders"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

/// 预检请求
#[tokio::test]
async fn options_preflight_returns_204_with_cors_headers() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/tenders")
        .body(Body::empty())
        .unwrap();

    let response = app_for(mock_settings(&server)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET, OPTIONS"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type"
    );
}

/// 不支持的方法
#[tokio::test]
async fn unsupported_method_returns_json_405() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tenders")
        .body(Body::empty())
        .unwrap();

    let response = app_for(mock_settings(&server)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_json_utf8(&response);
    assert_eq!(json_body(response).await["error"], "Method Not Allowed");
}

/// 无法解析的查询串
#[tokio::test]
async fn malformed_query_returns_json_400() {
    let server = MockServer::start().await;

    let response = app_for(mock_settings(&server))
        .oneshot(get("/api/tenders?q=a&q=b"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_utf8(&response);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));
}

/// 未知路径
#[tokio::test]
async fn unknown_path_returns_json_404() {
    let server = MockServer::start().await;

    let response = app_for(mock_settings(&server))
        .oneshot(get("/api/unknown"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_json_utf8(&response);
    assert_eq!(json_body(response).await["error"], "Not Found");
}
