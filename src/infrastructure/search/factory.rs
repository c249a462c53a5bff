// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{present, Settings};
use crate::domain::search::engine::{ProviderKind, SearchError, SearchProvider};
use crate::domain::search::semantic::SemanticSearch;
use crate::domain::services::entity_extractor::EntityExtractor;
use crate::infrastructure::search::duckduckgo::DuckDuckGoSearchEngine;
use crate::infrastructure::search::google::GoogleSearchEngine;
use crate::infrastructure::search::http::build_client;
use crate::infrastructure::search::serper::SerperSearchEngine;
use crate::infrastructure::search::vertex::{VertexEndpoint, VertexSearchClient, VertexSearchEngine};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 单个提供方的配置状态
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub name: &'static str,
    pub kind: ProviderKind,
    pub configured: bool,
    /// 缺失的配置项（环境变量形式）
    pub missing: Vec<&'static str>,
}

/// 按配置装配好的提供方集合
pub struct ProviderRegistry {
    /// 参与人物检索分发的提供方，按合并顺序排列
    pub providers: Vec<Arc<dyn SearchProvider>>,
    /// 无需凭据的兜底提供方
    pub fallback: Option<Arc<dyn SearchProvider>>,
    /// 企业检索使用的语义检索后端
    pub semantic: Option<Arc<dyn SemanticSearch>>,
    pub status: Vec<ProviderStatus>,
}

fn missing(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect()
}

/// 各提供方是否已配置、缺哪些配置项
pub fn provider_status(settings: &Settings) -> Vec<ProviderStatus> {
    let google = missing(&[
        (
            "KENSAKU__GOOGLE_SEARCH__API_KEY",
            present(&settings.google_search.api_key).is_some(),
        ),
        (
            "KENSAKU__GOOGLE_SEARCH__CX",
            present(&settings.google_search.cx).is_some(),
        ),
    ]);
    let serper = missing(&[(
        "KENSAKU__SERPER__API_KEY",
        present(&settings.serper.api_key).is_some(),
    )]);
    let duckduckgo = missing(&[("KENSAKU__DUCKDUCKGO__ENABLED", settings.duckduckgo.enabled)]);
    let vertex = missing(&[
        (
            "KENSAKU__VERTEX__PROJECT_ID",
            present(&settings.vertex.project_id).is_some(),
        ),
        (
            "KENSAKU__VERTEX__ENGINE_ID",
            present(&settings.vertex.engine_id).is_some(),
        ),
        (
            "KENSAKU__VERTEX__ACCESS_TOKEN",
            present(&settings.vertex.access_token).is_some(),
        ),
    ]);

    [
        ("google", ProviderKind::PrimaryWeb, google),
        ("serper", ProviderKind::SecondaryWeb, serper),
        ("duckduckgo", ProviderKind::FallbackWeb, duckduckgo),
        ("vertex", ProviderKind::Semantic, vertex),
    ]
    .into_iter()
    .map(|(name, kind, missing)| ProviderStatus {
        name,
        kind,
        configured: missing.is_empty(),
        missing,
    })
    .collect()
}

/// 凭据齐全的提供方才会被创建，缺凭据只是不启用，不算错误
pub fn build_providers(
    settings: &Settings,
    extractor: EntityExtractor,
) -> Result<ProviderRegistry, SearchError> {
    let client = build_client(Duration::from_secs(settings.search.request_timeout_secs))?;
    let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();

    if let (Some(api_key), Some(cx)) = (
        present(&settings.google_search.api_key),
        present(&settings.google_search.cx),
    ) {
        providers.push(Arc::new(GoogleSearchEngine::new(
            client.clone(),
            api_key,
            cx,
            settings.google_search.base_url.clone(),
            extractor.clone(),
        )));
    }

    if let Some(api_key) = present(&settings.serper.api_key) {
        providers.push(Arc::new(
            SerperSearchEngine::new(
                client.clone(),
                api_key,
                settings.serper.base_url.clone(),
                extractor.clone(),
            )
            .with_locale(settings.serper.gl.clone(), settings.serper.hl.clone()),
        ));
    }

    let vertex = match (
        present(&settings.vertex.project_id),
        present(&settings.vertex.engine_id),
        present(&settings.vertex.access_token),
    ) {
        (Some(project_id), Some(engine_id), Some(token)) => {
            let endpoint = VertexEndpoint {
                project_id: project_id.to_string(),
                location: settings.vertex.location.clone(),
                engine_id: engine_id.to_string(),
                serving_config_id: settings.vertex.serving_config_id.clone(),
            };
            Some(Arc::new(VertexSearchClient::new(
                client.clone(),
                endpoint,
                token,
                settings.vertex.base_url.clone(),
            )))
        }
        _ => None,
    };
    if let Some(vertex) = &vertex {
        providers.push(Arc::new(VertexSearchEngine::new(
            vertex.clone(),
            extractor.clone(),
        )));
    }

    let fallback: Option<Arc<dyn SearchProvider>> = if settings.duckduckgo.enabled {
        Some(Arc::new(DuckDuckGoSearchEngine::new(
            client,
            settings.duckduckgo.base_url.clone(),
            extractor,
        )))
    } else {
        None
    };

    let registry = ProviderRegistry {
        providers,
        fallback,
        semantic: vertex.map(|v| v as Arc<dyn SemanticSearch>),
        status: provider_status(settings),
    };
    info!(
        "Enabled providers: [{}], fallback: {}",
        registry
            .providers
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", "),
        registry.fallback.as_ref().map(|f| f.name()).unwrap_or("none")
    );
    Ok(registry)
}
