// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::check_serp_use_case::CheckSerpUseCase;
use crate::config::settings::{CorsSettings, Settings};
use crate::presentation::handlers::{health_handler, metrics_handler, serp_handler};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// 创建应用路由
///
/// # 参数
///
/// * `settings` - 应用配置
/// * `use_case` - 排名检查用例
/// * `metrics` - Prometheus 指标句柄
///
/// # 返回值
///
/// 返回配置好的路由，包含跨域和请求追踪中间件
pub fn routes(
    settings: Arc<Settings>,
    use_case: Arc<CheckSerpUseCase>,
    metrics: PrometheusHandle,
) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(health_handler::health))
        .route("/api/version", get(version))
        .route("/api/check-serp", post(serp_handler::check_serp))
        .layer(cors_layer(&settings.cors));

    Router::new()
        .route("/", get(health_handler::index))
        .route("/metrics", get(metrics_handler::metrics))
        .merge(api_routes)
        .fallback(health_handler::not_found)
        .layer(Extension(use_case))
        .layer(Extension(metrics))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 根据配置构建跨域中间件
///
/// 列表中包含 `*` 时允许任意来源；无法解析的来源会被忽略
pub fn cors_layer(cors: &CorsSettings) -> CorsLayer {
    let origins = &cors.allowed_origins;
    let allow_origin = if origins.iter().any(|o| o.trim() == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
