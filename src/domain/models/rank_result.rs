// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::rank_query::RankQuery;
use crate::domain::models::search_result::SearchResultItem;

/// 预览结果条数
pub const TOP_RESULTS_LIMIT: usize = 10;

/// 命中条目的详情
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchedResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub displayed_link: String,
}

impl From<&SearchResultItem> for MatchedResult {
    fn from(item: &SearchResultItem) -> Self {
        Self {
            url: item.url.clone(),
            title: item.title.clone(),
            snippet: item.snippet.clone(),
            displayed_link: item.displayed_link.clone(),
        }
    }
}

/// 单个关键词的排名结果
///
/// `found` 为真当且仅当 `position` 存在；`top_results` 恒为前 10 条结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankResult {
    pub keyword: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    pub found: bool,
    #[serde(flatten)]
    pub matched: Option<MatchedResult>,
    pub top_results: Vec<SearchResultItem>,
    pub total_results: usize,
    pub timestamp: DateTime<Utc>,
}

impl RankResult {
    /// 由已排序的结果和命中条目构造排名结果
    pub fn new(
        query: &RankQuery,
        results: &[SearchResultItem],
        matched: Option<&SearchResultItem>,
    ) -> Self {
        Self {
            keyword: query.keyword().to_string(),
            domain: query.domain().to_string(),
            position: matched.map(|item| item.position),
            found: matched.is_some(),
            matched: matched.map(MatchedResult::from),
            top_results: results.iter().take(TOP_RESULTS_LIMIT).cloned().collect(),
            total_results: results.len(),
            timestamp: Utc::now(),
        }
    }
}

/// 查询失败的关键词
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedKeyword {
    pub keyword: String,
    pub domain: String,
    pub found: bool,
    pub position: Option<u32>,
    pub error: String,
}

impl FailedKeyword {
    pub fn new(query: &RankQuery, error: impl Into<String>) -> Self {
        Self {
            keyword: query.keyword().to_string(),
            domain: query.domain().to_string(),
            found: false,
            position: None,
            error: error.into(),
        }
    }
}

/// 批量查询中单个关键词的结果
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum KeywordOutcome {
    Ranked(RankResult),
    Failed(FailedKeyword),
}

impl KeywordOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, KeywordOutcome::Failed(_))
    }
}

/// 批量排名结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchRankResult {
    pub domain: String,
    pub results: Vec<KeywordOutcome>,
    pub total_keywords: usize,
    pub timestamp: DateTime<Utc>,
}
