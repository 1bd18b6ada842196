// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SerpApiSettings;
use crate::domain::models::search_result::SearchResultItem;
use crate::domain::search::engine::{SearchError, SearchProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// SerpApi 在查询无结果时以 `error` 字段返回的提示
const NO_RESULTS_MARKER: &str = "hasn't returned any results";
const MISSING_FIELD: &str = "N/A";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    organic_results: Option<Vec<SerpApiOrganicResult>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiOrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    displayed_link: Option<String>,
}

/// SerpApi 自然搜索结果提供方
///
/// 按 `page_size` 顺序分页请求，直到收集到 `limit` 条结果或某一页为空。
/// 下一页的 `start` 取已收到的结果数
pub struct SerpApiProvider {
    client: Client,
    settings: SerpApiSettings,
}

impl SerpApiProvider {
    pub fn new(settings: SerpApiSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("serptrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SearchError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, settings })
    }

    async fn fetch_page(
        &self,
        keyword: &str,
        start: u32,
        num: u32,
    ) -> Result<Vec<SerpApiOrganicResult>, SearchError> {
        let params: [(&str, String); 12] = [
            ("api_key", self.settings.api_key.clone()),
            ("engine", self.settings.engine.clone()),
            ("q", keyword.to_string()),
            ("location", self.settings.location.clone()),
            ("num", num.to_string()),
            ("start", start.to_string()),
            ("gl", self.settings.gl.clone()),
            ("hl", self.settings.hl.clone()),
            ("device", "desktop".to_string()),
            ("google_domain", self.settings.google_domain.clone()),
            ("safe", "off".to_string()),
            ("no_cache", "true".to_string()),
        ];

        debug!(keyword, start, num, "Requesting SerpApi page");

        let response = self
            .client
            .get(&self.settings.base_url)
            .query(&params)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_request_error)?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %truncate(&body, 512),
                "SerpApi returned non-success status"
            );
            return Err(SearchError::Status(status.as_u16()));
        }

        parse_page(&body)
    }
}

fn map_request_error(e: reqwest::Error) -> SearchError {
    // The request URL carries the API key
    let e = e.without_url();
    if e.is_timeout() {
        SearchError::Timeout
    } else if e.is_decode() {
        SearchError::MalformedResponse(e.to_string())
    } else {
        SearchError::NetworkError(e.to_string())
    }
}

fn parse_page(body: &str) -> Result<Vec<SerpApiOrganicResult>, SearchError> {
    let page: SerpApiResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    if let Some(error) = page.error {
        if error.contains(NO_RESULTS_MARKER) {
            return Ok(Vec::new());
        }
        return Err(SearchError::ProviderError(error));
    }

    Ok(page.organic_results.unwrap_or_default())
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING_FIELD.to_string())
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    async fn organic_results(
        &self,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<SearchResultItem>, SearchError> {
        let page_size = self.settings.page_size.clamp(1, 100).min(limit.max(1));
        let mut raw = Vec::new();

        // Google may return fewer results than `num`, so the offset follows what came back
        while (raw.len() as u32) < limit {
            let start = raw.len() as u32;
            let page = self.fetch_page(keyword, start, page_size).await?;
            debug!(start, fetched = page.len(), "SerpApi page fetched");
            if page.is_empty() {
                break;
            }
            raw.extend(page);
        }

        raw.truncate(limit as usize);
        info!(
            keyword,
            total = raw.len(),
            "Fetched organic results from SerpApi"
        );

        Ok(raw
            .into_iter()
            .enumerate()
            .map(|(idx, r)| {
                SearchResultItem::new(
                    idx as u32 + 1,
                    or_missing(r.title),
                    or_missing(r.link),
                    or_missing(r.snippet),
                )
                .with_displayed_link(or_missing(r.displayed_link))
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}
