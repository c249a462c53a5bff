// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum::Extension;
use axum_test::TestServer;
use kensaku::config::settings::Settings;
use kensaku::domain::models::quota::QuotaLimits;
use kensaku::domain::models::search_result::{ProviderPage, SearchResult};
use kensaku::domain::search::engine::{ProviderKind, SearchError, SearchProvider};
use kensaku::domain::search::query::SearchQuery;
use kensaku::domain::search::semantic::SemanticSearch;
use kensaku::domain::services::enterprise_search_service::EnterpriseSearchService;
use kensaku::domain::services::quota_service::QuotaTracker;
use kensaku::domain::services::search_service::SearchService;
use kensaku::infrastructure::quota::InMemoryQuotaRepository;
use kensaku::infrastructure::search::provider_status;
use kensaku::presentation::routes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 返回固定结果的提供方，记录调用次数与最后一次查询
pub struct FakeProvider {
    name: &'static str,
    outcome: Result<ProviderPage, SearchError>,
    calls: AtomicUsize,
    last_query: Mutex<Option<SearchQuery>>,
}

impl FakeProvider {
    pub fn returning(name: &'static str, results: Vec<SearchResult>) -> Arc<Self> {
        Self::with_page(name, ProviderPage::local(results))
    }

    pub fn with_page(name: &'static str, page: ProviderPage) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome: Ok(page),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn failing(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome: Err(SearchError::HttpStatus {
                provider: "fake",
                status: 500,
            }),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<SearchQuery> {
        self.last_query.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for FakeProvider {
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock() = Some(query.clone());
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::PrimaryWeb
    }
}

pub fn result(provider: &str, link: &str, snippet: &str) -> SearchResult {
    SearchResult::new(
        format!("{}-{}", provider, link),
        "田中太郎".to_string(),
        provider,
        "example.jp".to_string(),
        snippet.to_string(),
    )
    .with_link(link)
}

pub fn tracker(daily_search_limit: u32, daily_provider_call_limit: u32) -> Arc<QuotaTracker> {
    Arc::new(QuotaTracker::new(
        Arc::new(InMemoryQuotaRepository::new()),
        QuotaLimits {
            daily_search_limit,
            daily_provider_call_limit,
        },
    ))
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub quota: Arc<QuotaTracker>,
}

/// 与 `main.rs` 相同的装配方式，提供方换成测试替身
pub fn create_test_app(
    providers: Vec<Arc<dyn SearchProvider>>,
    fallback: Option<Arc<dyn SearchProvider>>,
    semantic: Option<Arc<dyn SemanticSearch>>,
    quota: Arc<QuotaTracker>,
) -> TestApp {
    create_test_app_with_settings(
        providers,
        fallback,
        semantic,
        quota,
        Settings::from_toml("").unwrap(),
    )
}

pub fn create_test_app_with_settings(
    providers: Vec<Arc<dyn SearchProvider>>,
    fallback: Option<Arc<dyn SearchProvider>>,
    semantic: Option<Arc<dyn SemanticSearch>>,
    quota: Arc<QuotaTracker>,
    settings: Settings,
) -> TestApp {
    let search_service = Arc::new(
        SearchService::new(providers, fallback, quota.clone())
            .with_max_name_length(settings.search.max_name_length),
    );
    let enterprise_service = Arc::new(
        EnterpriseSearchService::new(semantic, quota.clone())
            .with_max_name_length(settings.search.max_name_length),
    );

    let app = routes::routes()
        .layer(Extension(search_service))
        .layer(Extension(enterprise_service))
        .layer(Extension(quota.clone()))
        .layer(Extension(Arc::new(provider_status(&settings))));

    TestApp {
        server: TestServer::new(app).unwrap(),
        quota,
    }
}
