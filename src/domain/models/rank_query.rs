// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::config::settings::LimitSettings;
use crate::utils::url_utils::normalize_domain;

/// 查询参数校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidQuery {
    #[error("Keyword is required")]
    MissingKeyword,
    #[error("At least one keyword is required")]
    NoKeywords,
    #[error("Domain is required")]
    MissingDomain,
    #[error("Keyword '{prefix}...' exceeds maximum length of {max} characters")]
    KeywordTooLong { prefix: String, max: usize },
    #[error("Domain exceeds maximum length of {max} characters")]
    DomainTooLong { max: usize },
    #[error("Invalid domain format")]
    InvalidDomain,
}

/// 排名查询
///
/// 每个请求构造一次，构造后不可变。`keyword` 与 `domain` 均已去除首尾空白。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankQuery {
    keyword: String,
    domain: String,
    host: String,
}

impl RankQuery {
    /// 校验并构造查询
    ///
    /// # Errors
    ///
    /// 关键词或域名为空、超长，或域名格式不合法时返回 [`InvalidQuery`]
    pub fn new(keyword: &str, domain: &str, limits: &LimitSettings) -> Result<Self, InvalidQuery> {
        let keyword = keyword.trim();
        let domain = domain.trim();

        if keyword.is_empty() {
            return Err(InvalidQuery::MissingKeyword);
        }
        if domain.is_empty() {
            return Err(InvalidQuery::MissingDomain);
        }
        if keyword.chars().count() > limits.max_keyword_length {
            return Err(InvalidQuery::KeywordTooLong {
                prefix: keyword.chars().take(30).collect(),
                max: limits.max_keyword_length,
            });
        }
        if domain.chars().count() > limits.max_domain_length {
            return Err(InvalidQuery::DomainTooLong {
                max: limits.max_domain_length,
            });
        }
        if domain.chars().any(char::is_whitespace) || !domain.contains('.') {
            return Err(InvalidQuery::InvalidDomain);
        }

        let host = normalize_domain(domain);
        if host.is_empty() || !host.contains('.') {
            return Err(InvalidQuery::InvalidDomain);
        }

        Ok(Self {
            keyword: keyword.to_string(),
            domain: domain.to_string(),
            host,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// 调用方提交的域名（已去除空白）
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// 归一化后的主机名，用于匹配
    pub fn host(&self) -> &str {
        &self.host
    }
}
