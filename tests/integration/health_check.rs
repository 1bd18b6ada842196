// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{app, get, post_json, send, MockProvider};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::util::ServiceExt;

/// 根路径在线检查
#[tokio::test]
async fn index_reports_online() {
    let (status, body) = send(app(MockProvider::with_results(vec![])), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["service"], "SERP Tracker API");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// 详细健康检查不泄露密钥
#[tokio::test]
async fn health_reports_configuration_without_secrets() {
    let (status, body) = send(app(MockProvider::with_results(vec![])), get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["config"]["serpapi_configured"], true);
    assert_eq!(body["config"]["engine"], "google");
    assert_eq!(body["config"]["location"], "United States");
    assert!(!body.to_string().contains("test-key"));
}

/// 未知路由返回统一错误包
#[tokio::test]
async fn unknown_route_returns_not_found_envelope() {
    let (status, body) = send(app(MockProvider::with_results(vec![])), get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
}

/// 指标端点输出 Prometheus 文本
#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let router = app(MockProvider::with_results(vec![]));
    let _ = send(
        router.clone(),
        post_json("/api/check-serp", r#"{"keyword": "python", "domain": "python.org"}"#),
    )
    .await;

    let response = router.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("serp_checks_total"));
}

/// 允许的来源可以通过跨域预检
#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let response = app(MockProvider::with_results(vec![]))
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/check-serp")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}

/// 未配置的来源不会获得跨域许可
#[tokio::test]
async fn cors_rejects_unknown_origin() {
    let response = app(MockProvider::with_results(vec![]))
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/check-serp")
                .header(header::ORIGIN, "https://evil.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
