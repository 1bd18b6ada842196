// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::models::rank_query::InvalidQuery;

/// 单次请求允许的最大关键词数
pub const MAX_KEYWORDS: usize = 10;

/// 排名检查请求数据传输对象
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct CheckSerpRequestDto {
    /// 单个关键词
    pub keyword: Option<String>,
    /// 多个关键词，优先于 `keyword`；数量上限在 [`CheckSerpRequestDto::normalized`] 之后校验
    #[validate(length(max = 10, message = "Maximum 10 keywords allowed"))]
    pub keywords: Option<Vec<String>>,
    /// 目标域名
    pub domain: Option<String>,
    /// 客户端 reCAPTCHA 令牌
    #[serde(rename = "recaptchaToken")]
    pub recaptcha_token: Option<String>,
}

impl CheckSerpRequestDto {
    /// 清理关键词列表：去除首尾空白并丢弃空白项
    ///
    /// 空数组视为未提供；非空但全部为空白的数组保留为空列表，由 [`Self::effective_keywords`] 报错。
    /// 数量上限针对清理后的列表校验。
    pub fn normalized(mut self) -> Self {
        self.keywords = self.keywords.filter(|list| !list.is_empty()).map(|list| {
            list.iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        });
        self
    }

    /// 本次请求要检查的关键词
    ///
    /// 提供了 `keywords` 时只使用列表，否则使用 `keyword`
    pub fn effective_keywords(&self) -> Result<Vec<String>, InvalidQuery> {
        if let Some(list) = &self.keywords {
            return if list.is_empty() {
                Err(InvalidQuery::NoKeywords)
            } else {
                Ok(list.clone())
            };
        }

        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| vec![k.to_string()])
            .ok_or(InvalidQuery::MissingKeyword)
    }
}

/// 取第一条校验错误信息
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
