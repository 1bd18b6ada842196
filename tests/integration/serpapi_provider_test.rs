// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::test_settings;
use serde_json::{json, Value};
use serptrack::config::settings::SerpApiSettings;
use serptrack::domain::search::engine::{SearchError, SearchProvider};
use serptrack::infrastructure::search::serpapi::SerpApiProvider;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, page_size: u32) -> SerpApiSettings {
    let mut settings = test_settings().serpapi;
    settings.base_url = format!("{}/search", server.uri());
    settings.page_size = page_size;
    settings.timeout_secs = 1;
    settings
}

fn organic_page(first: u32, count: u32) -> Value {
    let results: Vec<Value> = (first..first + count)
        .map(|i| {
            json!({
                "position": i - first + 1,
                "title": format!("Result {i}"),
                "link": format!("https://site{i}.com/page"),
                "snippet": format!("Snippet {i}"),
                "displayed_link": format!("site{i}.com"),
            })
        })
        .collect();
    json!({ "search_metadata": { "status": "Success" }, "organic_results": results })
}

#[tokio::test]
async fn fetches_single_page_with_expected_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "python tutorials"))
        .and(query_param("num", "100"))
        .and(query_param("start", "0"))
        .and(query_param("device", "desktop"))
        .and(query_param("no_cache", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(1, 100)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let results = provider.organic_results("python tutorials", 100).await.unwrap();

    assert_eq!(results.len(), 100);
    assert_eq!(results[0].position, 1);
    assert_eq!(results[99].position, 100);
    assert_eq!(results[2].url, "https://site3.com/page");
    assert_eq!(results[2].displayed_link, "site3.com");
}

#[tokio::test]
async fn paginates_and_renumbers_positions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(1, 10)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(11, 10)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic_results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 10)).unwrap();
    let results = provider.organic_results("python", 50).await.unwrap();

    assert_eq!(results.len(), 20);
    let positions: Vec<u32> = results.iter().map(|r| r.position).collect();
    assert_eq!(positions, (1..=20).collect::<Vec<u32>>());
    assert_eq!(results[10].url, "https://site11.com/page");
}

#[tokio::test]
async fn short_pages_advance_by_received_count() {
    let server = MockServer::start().await;
    for (start, first, count) in [("0", 1, 10), ("10", 11, 10), ("20", 21, 0)] {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("start", start))
            .and(query_param("num", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(first, count)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let results = provider.organic_results("python", 100).await.unwrap();

    assert_eq!(results.len(), 20);
    assert_eq!(results[19].position, 20);
    assert_eq!(results[19].url, "https://site20.com/page");
}

#[tokio::test]
async fn truncates_to_requested_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(1, 12)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let results = provider.organic_results("python", 10).await.unwrap();

    assert_eq!(results.len(), 10);
}

#[tokio::test]
async fn missing_fields_default_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [{ "link": "https://python.org/" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic_results": [] })))
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let results = provider.organic_results("python", 100).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "N/A");
    assert_eq!(results[0].snippet, "N/A");
    assert_eq!(results[0].url, "https://python.org/");
}

#[tokio::test]
async fn no_results_error_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Google hasn't returned any results for this query."
        })))
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    assert!(provider.organic_results("zzqx", 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn api_error_body_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Your account has run out of searches."
        })))
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let err = provider.organic_results("python", 100).await.unwrap_err();

    assert_eq!(
        err,
        SearchError::ProviderError("Your account has run out of searches.".to_string())
    );
}

#[tokio::test]
async fn unauthorized_status_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid API key." })),
        )
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let err = provider.organic_results("python", 100).await.unwrap_err();

    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn failed_later_page_fails_whole_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_page(1, 10)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 10)).unwrap();
    let err = provider.organic_results("python", 100).await.unwrap_err();

    assert!(err.is_quota_exceeded());
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let err = provider.organic_results("python", 100).await.unwrap_err();

    assert!(matches!(err, SearchError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_provider_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(organic_page(1, 10))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = SerpApiProvider::new(settings_for(&server, 100)).unwrap();
    let err = provider.organic_results("python", 100).await.unwrap_err();

    assert_eq!(err, SearchError::Timeout);
}
