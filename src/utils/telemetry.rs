// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// 未设置 `RUST_LOG` 时使用的过滤规则
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug,serptrack=debug"
    } else {
        "info,serptrack=info"
    }
}

/// 初始化全局日志订阅器
///
/// `RUST_LOG` 优先；`json` 为真时输出结构化 JSON 日志
pub fn init_telemetry(debug: bool, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug).into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}
