// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::{
    application::dto::check_serp_request::{first_validation_message, CheckSerpRequestDto},
    config::settings::LimitSettings,
    domain::{
        models::{
            rank_query::{InvalidQuery, RankQuery},
            rank_result::{BatchRankResult, RankResult},
        },
        services::{
            captcha_service::CaptchaVerifier,
            rank_service::{RankService, RankServiceError},
        },
    },
    infrastructure::observability::metrics::{self, CheckOutcome},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

pub const CAPTCHA_FAILED_MESSAGE: &str = "reCAPTCHA verification failed. Please try again.";

#[derive(Error, Debug)]
pub enum CheckSerpUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("reCAPTCHA verification failed. Please try again.")]
    CaptchaFailed,
    #[error(transparent)]
    Rank(#[from] RankServiceError),
}

impl From<InvalidQuery> for CheckSerpUseCaseError {
    fn from(err: InvalidQuery) -> Self {
        CheckSerpUseCaseError::ValidationError(err.to_string())
    }
}

/// 排名检查结果：单个关键词时为 [`RankResult`]，多个关键词时为 [`BatchRankResult`]
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckSerpOutcome {
    Single(RankResult),
    Batch(BatchRankResult),
}

pub struct CheckSerpUseCase {
    rank_service: Arc<RankService>,
    captcha: Arc<dyn CaptchaVerifier>,
    limits: LimitSettings,
}

impl CheckSerpUseCase {
    pub fn new(
        rank_service: Arc<RankService>,
        captcha: Arc<dyn CaptchaVerifier>,
        limits: LimitSettings,
    ) -> Self {
        Self {
            rank_service,
            captcha,
            limits,
        }
    }

    /// 执行排名检查
    ///
    /// 顺序：人机验证 -> 输入校验 -> 排名解析。校验失败时不会调用搜索提供方。
    pub async fn execute(
        &self,
        dto: CheckSerpRequestDto,
    ) -> Result<CheckSerpOutcome, CheckSerpUseCaseError> {
        // A blank token is treated as absent
        if let Some(token) = dto
            .recaptcha_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
        {
            self.verify_captcha(token).await?;
        }

        let dto = dto.normalized();
        let queries = self.parse_queries(&dto).inspect_err(|e| {
            warn!(error = %e, "Invalid input");
            metrics::record_check(CheckOutcome::InvalidInput);
        })?;

        if let [query] = queries.as_slice() {
            let result = self.rank_service.resolve(query).await?;
            return Ok(CheckSerpOutcome::Single(result));
        }

        let domain = queries[0].domain().to_string();
        let batch = self.rank_service.resolve_batch(&domain, &queries).await;
        info!(
            domain = %domain,
            total_keywords = batch.total_keywords,
            failed = batch.results.iter().filter(|r| r.is_failed()).count(),
            "Batch rank check completed"
        );
        Ok(CheckSerpOutcome::Batch(batch))
    }

    async fn verify_captcha(&self, token: &str) -> Result<(), CheckSerpUseCaseError> {
        if !self.captcha.is_enabled() {
            warn!("reCAPTCHA secret key not configured, skipping verification");
            return Ok(());
        }

        self.captcha.verify(token).await.map_err(|e| {
            warn!(error = %e, "reCAPTCHA verification failed");
            CheckSerpUseCaseError::CaptchaFailed
        })
    }

    fn parse_queries(
        &self,
        dto: &CheckSerpRequestDto,
    ) -> Result<Vec<RankQuery>, CheckSerpUseCaseError> {
        dto.validate()
            .map_err(|e| CheckSerpUseCaseError::ValidationError(first_validation_message(&e)))?;

        let keywords = dto.effective_keywords()?;

        let domain = dto.domain.as_deref().unwrap_or_default();
        keywords
            .iter()
            .map(|keyword| RankQuery::new(keyword, domain, &self.limits).map_err(Into::into))
            .collect()
    }
}
