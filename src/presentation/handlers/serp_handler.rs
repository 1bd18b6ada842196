// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{rejection::JsonRejection, Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    application::{
        dto::{api_response::ApiResponse, check_serp_request::CheckSerpRequestDto},
        use_cases::check_serp_use_case::CheckSerpUseCase,
    },
    presentation::errors::AppError,
};

/// 处理排名检查请求
///
/// # 参数
///
/// * `use_case` - 排名检查用例
/// * `payload` - 请求体，解析失败时返回 400
///
/// # 返回值
///
/// 成功（无论是否找到域名）时返回 200 和排名结果；
/// 输入校验失败返回 400，搜索提供方失败返回 502
pub async fn check_serp(
    Extension(use_case): Extension<Arc<CheckSerpUseCase>>,
    payload: Result<Json<CheckSerpRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(dto) = payload?;
    let check_id = Uuid::new_v4();
    info!(
        %check_id,
        domain = dto.domain.as_deref().unwrap_or("unknown"),
        "Received SERP check request"
    );

    let outcome = use_case
        .execute(dto)
        .instrument(info_span!("check_serp", %check_id))
        .await?;
    Ok((StatusCode::OK, Json(ApiResponse::ok(outcome))))
}
