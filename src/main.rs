// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serptrack::application::use_cases::check_serp_use_case::CheckSerpUseCase;
use serptrack::config::settings::Settings;
use serptrack::domain::services::captcha_service::CaptchaVerifier;
use serptrack::domain::services::rank_service::RankService;
use serptrack::infrastructure::captcha::recaptcha::RecaptchaVerifier;
use serptrack::infrastructure::observability::metrics;
use serptrack::infrastructure::search::serpapi::SerpApiProvider;
use serptrack::presentation::routes;
use serptrack::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(settings.debug, settings.log_json)?;
    info!("Starting serptrack...");

    if let Err(e) = settings.validate() {
        error!("Configuration error: {}", e);
        return Err(e.into());
    }
    info!("Configuration validated successfully");

    // 3. Initialize Prometheus metrics
    let metrics_handle = metrics::init_metrics()?;

    // 4. Initialize components
    let provider = Arc::new(SerpApiProvider::new(settings.serpapi.clone())?);
    let rank_service = Arc::new(RankService::new(provider, settings.serpapi.max_results));

    let captcha: Arc<dyn CaptchaVerifier> = Arc::new(RecaptchaVerifier::new(&settings.recaptcha)?);
    if !captcha.is_enabled() {
        warn!("reCAPTCHA secret key not configured, tokens will not be verified");
    }

    let use_case = Arc::new(CheckSerpUseCase::new(
        rank_service,
        captcha,
        settings.limits.clone(),
    ));

    // 5. Start HTTP server
    let app = routes::routes(settings.clone(), use_case, metrics_handle);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        engine = %settings.serpapi.engine,
        location = %settings.serpapi.location,
        "Server listening on {}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
