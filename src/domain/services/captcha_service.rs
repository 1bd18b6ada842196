// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptchaError {
    #[error("Captcha verification request failed: {0}")]
    Request(String),
    #[error("Captcha verification rejected: {0:?}")]
    Rejected(Vec<String>),
}

/// 人机验证服务接口
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// 是否已配置密钥；未配置时调用方应跳过校验
    fn is_enabled(&self) -> bool;

    /// 校验客户端提交的令牌
    async fn verify(&self, token: &str) -> Result<(), CaptchaError>;
}

/// 不做任何校验的实现，用于未配置密钥的部署
pub struct DisabledCaptcha;

#[async_trait]
impl CaptchaVerifier for DisabledCaptcha {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn verify(&self, _token: &str) -> Result<(), CaptchaError> {
        Ok(())
    }
}
