// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use crate::{application::dto::api_response::ApiResponse, config::settings::Settings};

pub const SERVICE_NAME: &str = "SERP Tracker API";

/// 根路径在线检查
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}

/// 详细健康检查，不暴露任何密钥
pub async fn health(Extension(settings): Extension<Arc<Settings>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": Utc::now(),
        "config": {
            "serpapi_configured": !settings.serpapi.api_key.trim().is_empty(),
            "engine": settings.serpapi.engine,
            "location": settings.serpapi.location,
            "recaptcha_configured": settings.recaptcha_enabled(),
        }
    }))
}

/// 未匹配路由
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Endpoint not found")),
    )
}
