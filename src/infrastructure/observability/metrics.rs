// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use std::time::Duration;
use tracing::info;

pub const CHECKS_TOTAL: &str = "serp_checks_total";
pub const PROVIDER_REQUESTS_TOTAL: &str = "serp_provider_requests_total";
pub const PROVIDER_DURATION_SECONDS: &str = "serp_provider_duration_seconds";
pub const MATCH_POSITION: &str = "serp_match_position";

static PROMETHEUS: OnceCell<PrometheusHandle> = OnceCell::new();

/// 检查结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Found,
    NotFound,
    InvalidInput,
    UpstreamError,
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Found => "found",
            CheckOutcome::NotFound => "not_found",
            CheckOutcome::InvalidInput => "invalid_input",
            CheckOutcome::UpstreamError => "upstream_error",
        }
    }
}

/// 初始化指标系统
///
/// 安装全局 Prometheus 记录器并注册指标描述。重复调用返回同一个句柄。
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PROMETHEUS
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .set_buckets_for_metric(
                    Matcher::Full(PROVIDER_DURATION_SECONDS.to_string()),
                    &[0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0],
                )?
                .set_buckets_for_metric(
                    Matcher::Full(MATCH_POSITION.to_string()),
                    &[1.0, 3.0, 5.0, 10.0, 20.0, 50.0, 100.0],
                )?
                .install_recorder()?;

            describe_counter!(CHECKS_TOTAL, "Total number of rank checks by outcome");
            describe_counter!(
                PROVIDER_REQUESTS_TOTAL,
                "Total number of search provider calls by result"
            );
            describe_histogram!(
                PROVIDER_DURATION_SECONDS,
                "Duration of search provider calls in seconds"
            );
            describe_histogram!(MATCH_POSITION, "Rank position of matched domains");

            info!("Prometheus recorder installed");
            Ok(handle)
        })
        .cloned()
}

pub fn record_check(outcome: CheckOutcome) {
    counter!(CHECKS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_provider_call(provider: &'static str, elapsed: Duration, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    counter!(PROVIDER_REQUESTS_TOTAL, "provider" => provider, "result" => result).increment(1);
    histogram!(PROVIDER_DURATION_SECONDS, "provider" => provider).record(elapsed.as_secs_f64());
}

pub fn record_match_position(position: u32) {
    histogram!(MATCH_POSITION).record(f64::from(position));
}
