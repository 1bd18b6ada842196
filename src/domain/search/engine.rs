// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::SearchResultItem;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search provider timed out")]
    Timeout,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Search provider returned status {0}")]
    Status(u16),
    #[error("Search provider error: {0}")]
    ProviderError(String),
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// 认证失败（401/403）
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, SearchError::Status(401) | SearchError::Status(403))
    }

    /// 配额耗尽或被限流（429）
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, SearchError::Status(429))
    }

    /// 用于日志的失败分类
    pub fn reason(&self) -> &'static str {
        if self.is_auth_failure() {
            return "auth";
        }
        if self.is_quota_exceeded() {
            return "quota";
        }
        match self {
            SearchError::Timeout => "timeout",
            SearchError::NetworkError(_) => "network",
            SearchError::Status(_) => "status",
            SearchError::ProviderError(_) => "provider",
            SearchError::MalformedResponse(_) => "malformed",
        }
    }
}

/// 自然搜索结果提供方
///
/// 返回的序列按排名升序排列，`position` 从 1 开始连续编号
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch up to `limit` organic results for `keyword`
    async fn organic_results(
        &self,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<SearchResultItem>, SearchError>;

    /// Get the name of the provider
    fn name(&self) -> &'static str;
}
