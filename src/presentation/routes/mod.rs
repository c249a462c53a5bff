// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{
    enterprise_handler, provider_handler, quota_handler, search_handler,
};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// 服务实例通过 `Extension` 层注入，见 `main.rs`
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/v1/search", post(search_handler::search_person))
        .route(
            "/v1/enterprise-search",
            post(enterprise_handler::search_enterprise),
        )
        .route("/v1/quota", get(quota_handler::get_usage))
        .route("/v1/quota/reset", post(quota_handler::reset))
        .route("/v1/providers", get(provider_handler::list_providers));

    Router::new().merge(public_routes).merge(api_routes)
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
