// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::dto::api_response::ApiResponse;
use crate::application::use_cases::check_serp_use_case::{
    CheckSerpUseCaseError, CAPTCHA_FAILED_MESSAGE,
};
use crate::domain::services::rank_service::RankServiceError;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一转换为 `{"success": false, "error": ...}` 响应包。
/// 上游错误的细节只写入日志，不返回给调用方。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<CheckSerpUseCaseError>() {
            return match err {
                CheckSerpUseCaseError::ValidationError(msg) => {
                    (StatusCode::BAD_REQUEST, msg.clone())
                }
                CheckSerpUseCaseError::CaptchaFailed => {
                    (StatusCode::BAD_REQUEST, CAPTCHA_FAILED_MESSAGE.to_string())
                }
                CheckSerpUseCaseError::Rank(rank_err) => rank_status(rank_err),
            };
        }

        if let Some(err) = self.0.downcast_ref::<RankServiceError>() {
            return rank_status(err);
        }

        if self.0.downcast_ref::<JsonRejection>().is_some() {
            return (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE.to_string());
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        )
    }
}

fn rank_status(err: &RankServiceError) -> (StatusCode, String) {
    (StatusCode::BAD_GATEWAY, err.public_message())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self.0, "Request failed");
        }

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
