// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RecaptchaSettings;
use crate::domain::services::captcha_service::{CaptchaError, CaptchaVerifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// Google reCAPTCHA 校验实现
pub struct RecaptchaVerifier {
    client: Client,
    secret: Option<String>,
    verify_url: String,
}

impl RecaptchaVerifier {
    pub fn new(settings: &RecaptchaSettings) -> Result<Self, CaptchaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CaptchaError::Request(e.to_string()))?;

        let secret = settings
            .secret_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            client,
            secret,
            verify_url: settings.verify_url.clone(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    async fn verify(&self, token: &str) -> Result<(), CaptchaError> {
        let Some(secret) = self.secret.as_deref() else {
            warn!("reCAPTCHA secret key not configured, skipping verification");
            return Ok(());
        };

        if token.trim().is_empty() {
            return Err(CaptchaError::Rejected(vec!["missing-input-response".to_string()]));
        }

        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
            .map_err(|e| CaptchaError::Request(e.to_string()))?;

        let result: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| CaptchaError::Request(e.to_string()))?;

        if result.success {
            Ok(())
        } else {
            Err(CaptchaError::Rejected(result.error_codes))
        }
    }
}
