// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::rank_query::RankQuery;
use crate::domain::models::rank_result::{
    BatchRankResult, FailedKeyword, KeywordOutcome, RankResult,
};
use crate::domain::models::search_result::SearchResultItem;
use crate::domain::search::engine::{SearchError, SearchProvider};
use crate::infrastructure::observability::metrics::{self, CheckOutcome};
use crate::utils::url_utils::host_matches;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

/// 对调用方展示的上游失败信息，不包含任何提供方细节
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch search results. Please try again later.";
pub const UPSTREAM_TIMEOUT_MESSAGE: &str = "Search request timed out. Please try again.";

#[derive(Error, Debug)]
pub enum RankServiceError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] SearchError),
}

impl RankServiceError {
    /// 可以安全返回给调用方的信息
    pub fn public_message(&self) -> String {
        match self {
            RankServiceError::Upstream(SearchError::Timeout) => {
                UPSTREAM_TIMEOUT_MESSAGE.to_string()
            }
            RankServiceError::Upstream(_) => UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }
}

/// 返回首个属于目标主机的结果
///
/// `results` 须按 `position` 升序排列；找到后立即停止扫描
pub fn find_first_match<'a>(
    results: &'a [SearchResultItem],
    target_host: &str,
) -> Option<&'a SearchResultItem> {
    results
        .iter()
        .find(|item| host_matches(&item.url, target_host))
}

/// 排名解析服务
///
/// 无状态；每次解析只调用一次提供方，失败不重试
pub struct RankService {
    provider: Arc<dyn SearchProvider>,
    max_results: u32,
}

impl RankService {
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: u32) -> Self {
        Self {
            provider,
            max_results,
        }
    }

    /// 解析单个关键词的排名
    ///
    /// # Errors
    ///
    /// 提供方调用失败（超时、认证、配额、响应格式错误）时返回 [`RankServiceError::Upstream`]
    pub async fn resolve(&self, query: &RankQuery) -> Result<RankResult, RankServiceError> {
        info!(
            keyword = query.keyword(),
            domain = query.host(),
            max_results = self.max_results,
            "Resolving rank"
        );

        let started = Instant::now();
        let fetched = self
            .provider
            .organic_results(query.keyword(), self.max_results)
            .await;
        metrics::record_provider_call(self.provider.name(), started.elapsed(), fetched.is_ok());

        let mut results = match fetched {
            Ok(results) => results,
            Err(e) => {
                error!(
                    provider = self.provider.name(),
                    keyword = query.keyword(),
                    reason = e.reason(),
                    error = %e,
                    "Search provider call failed"
                );
                metrics::record_check(CheckOutcome::UpstreamError);
                return Err(e.into());
            }
        };

        results.sort_by_key(|item| item.position);
        results.truncate(self.max_results as usize);

        let matched = find_first_match(&results, query.host());
        match matched {
            Some(item) => {
                info!(
                    keyword = query.keyword(),
                    domain = query.host(),
                    position = item.position,
                    url = %item.url,
                    "Domain found"
                );
                metrics::record_check(CheckOutcome::Found);
                metrics::record_match_position(item.position);
            }
            None => {
                info!(
                    keyword = query.keyword(),
                    domain = query.host(),
                    total_results = results.len(),
                    "Domain not found"
                );
                metrics::record_check(CheckOutcome::NotFound);
            }
        }

        Ok(RankResult::new(query, &results, matched))
    }

    /// 依次解析多个关键词
    ///
    /// 单个关键词失败不会中断其他关键词，失败信息记录在对应条目中
    pub async fn resolve_batch(&self, domain: &str, queries: &[RankQuery]) -> BatchRankResult {
        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            let outcome = match self.resolve(query).await {
                Ok(rank) => KeywordOutcome::Ranked(rank),
                Err(e) => KeywordOutcome::Failed(FailedKeyword::new(query, e.public_message())),
            };
            results.push(outcome);
        }

        BatchRankResult {
            domain: domain.to_string(),
            total_keywords: results.len(),
            results,
            timestamp: Utc::now(),
        }
    }
}
