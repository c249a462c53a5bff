// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Extension;
use kensaku::config::settings::Settings;
use kensaku::domain::models::quota::QuotaLimits;
use kensaku::domain::services::enterprise_search_service::EnterpriseSearchService;
use kensaku::domain::services::entity_extractor::EntityExtractor;
use kensaku::domain::services::quota_service::QuotaTracker;
use kensaku::domain::services::search_service::SearchService;
use kensaku::infrastructure::quota::build_repository;
use kensaku::infrastructure::search::build_providers;
use kensaku::presentation::routes;
use kensaku::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting kensaku...");

    // 2. Load configuration
    let settings = Settings::new()?;

    // 3. Providers
    let registry = build_providers(&settings, EntityExtractor::default())?;
    for status in registry.status.iter().filter(|s| !s.configured) {
        warn!(
            "Provider {} disabled, missing: {}",
            status.name,
            status.missing.join(", ")
        );
    }

    // 4. Daily quota
    let limits = QuotaLimits {
        daily_search_limit: settings.quota.daily_search_limit,
        daily_provider_call_limit: settings.quota.daily_provider_call_limit,
    };
    let quota = Arc::new(QuotaTracker::new(build_repository(&settings.quota), limits));

    // 5. Services
    let search_service = Arc::new(
        SearchService::new(registry.providers, registry.fallback, quota.clone())
            .with_max_name_length(settings.search.max_name_length),
    );
    let enterprise_service = Arc::new(
        EnterpriseSearchService::new(registry.semantic, quota.clone())
            .with_max_name_length(settings.search.max_name_length),
    );

    let app = routes::routes()
        .layer(Extension(search_service))
        .layer(Extension(enterprise_service))
        .layer(Extension(quota))
        .layer(Extension(Arc::new(registry.status)))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
