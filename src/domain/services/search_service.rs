// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{
    ExtractedFields, ProviderPage, SearchResponse, SearchResult, PLACEHOLDER_SOURCE,
};
use crate::domain::repositories::quota_repository::QuotaError;
use crate::domain::search::engine::SearchProvider;
use crate::domain::search::query::SearchQuery;
use crate::domain::services::address_parser::parse_address;
use crate::domain::services::quota_service::QuotaTracker;
use crate::utils::id::generate_result_id;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_NAME_LENGTH: usize = 50;
pub const MAX_PAGE: u32 = 1000;

#[derive(Error, Debug)]
pub enum SearchServiceError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Quota store error: {0}")]
    Quota(#[from] QuotaError),
}

/// 人物检索聚合器
///
/// 向所有已启用的提供方并发分发同一逻辑查询，合并、按链接去重、
/// 按排除词过滤，并在完全取不到数据时退回到带标记的占位结果。
pub struct SearchService {
    providers: Vec<Arc<dyn SearchProvider>>,
    fallback: Option<Arc<dyn SearchProvider>>,
    quota: Arc<QuotaTracker>,
    max_name_length: usize,
}

impl SearchService {
    pub fn new(
        providers: Vec<Arc<dyn SearchProvider>>,
        fallback: Option<Arc<dyn SearchProvider>>,
        quota: Arc<QuotaTracker>,
    ) -> Self {
        Self {
            providers,
            fallback,
            quota,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub fn enabled_providers(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn quota(&self) -> &Arc<QuotaTracker> {
        &self.quota
    }

    /// 住址只解析一次，再交给 `search_person`
    pub async fn search_person_at(
        &self,
        name: &str,
        address: Option<&str>,
        exclude_keywords: Vec<String>,
        page: u32,
    ) -> Result<SearchResponse, SearchServiceError> {
        let mut query = SearchQuery::new(name).excluding(exclude_keywords).page(page);
        if let Some(address) = address {
            query = query.with_address(parse_address(address));
        }
        self.search_person(query).await
    }

    pub async fn search_person(
        &self,
        query: SearchQuery,
    ) -> Result<SearchResponse, SearchServiceError> {
        let started = Instant::now();
        let query = self.validate(query)?;

        let usage = self.quota.usage().await?;
        if !usage.can_search || !usage.can_call_provider {
            warn!(
                "Search for {} blocked by daily quota ({} searches, {} provider calls)",
                query.name, usage.used_searches, usage.provider_calls
            );
            return Ok(SearchResponse::blocked(query.page, elapsed(started)));
        }
        if !self.quota.record_search().await? {
            return Ok(SearchResponse::blocked(query.page, elapsed(started)));
        }

        debug!("Dispatching query: {}", query.to_query_string());

        let pages = self.dispatch(&self.providers, &query).await?;
        let (mut total_results, mut has_next_page) = page_signals(&pages);
        let merged: Vec<SearchResult> = pages.into_iter().flat_map(|p| p.results).collect();
        let mut results = deduplicate(merged);

        if results.is_empty() && self.providers.is_empty() {
            if let Some(fallback) = &self.fallback {
                info!("No providers configured, trying {}", fallback.name());
                let pages = self.dispatch(std::slice::from_ref(fallback), &query).await?;
                (total_results, has_next_page) = page_signals(&pages);
                results = deduplicate(pages.into_iter().flat_map(|p| p.results).collect());
            }
        }

        let fallback = results.is_empty();
        if fallback {
            info!("No results for {}, returning placeholder data", query.name);
            results = placeholder_results(&query.name);
            total_results = None;
            has_next_page = None;
        }

        let before = results.len();
        let results = apply_exclusions(results, &query.exclude_keywords);
        let excluded_count = before - results.len();

        // 合并多个提供方后条数可能超过单个提供方报告的总数
        let total_results = total_results
            .map(|t| t.max(results.len() as u64))
            .unwrap_or(results.len() as u64);
        info!(
            "Search for {} returned {} results ({} excluded)",
            query.name,
            results.len(),
            excluded_count
        );

        Ok(SearchResponse {
            results,
            total_results,
            search_time: elapsed(started),
            has_next_page: has_next_page.unwrap_or(false),
            current_page: query.page,
            limit_reached: false,
            fallback,
            excluded_count,
        })
    }

    fn validate(&self, mut query: SearchQuery) -> Result<SearchQuery, SearchServiceError> {
        if query.page > MAX_PAGE {
            return Err(SearchServiceError::ValidationError(format!(
                "page must be at most {} (got {})",
                MAX_PAGE, query.page
            )));
        }
        let name = query.name.trim();
        if name.is_empty() {
            return Err(SearchServiceError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        let length = name.chars().count();
        if length > self.max_name_length {
            return Err(SearchServiceError::ValidationError(format!(
                "name must be at most {} characters (got {})",
                self.max_name_length, length
            )));
        }
        query.name = name.to_string();
        Ok(query)
    }

    /// 每个提供方调用前各自记一次外部请求；配额在分发中途耗尽的提供方被跳过
    async fn dispatch(
        &self,
        providers: &[Arc<dyn SearchProvider>],
        query: &SearchQuery,
    ) -> Result<Vec<ProviderPage>, QuotaError> {
        let futures = providers.iter().map(|provider| {
            let provider = provider.clone();
            let quota = self.quota.clone();

            async move {
                let provider_name = provider.name();
                if !quota.record_provider_call().await? {
                    warn!("Skipping {}: provider call limit reached", provider_name);
                    return Ok::<_, QuotaError>(None);
                }

                let page = match provider.search(query).await {
                    Ok(page) => {
                        info!(
                            "Provider {} returned {} results",
                            provider_name,
                            page.results.len()
                        );
                        Some(page)
                    }
                    Err(e) => {
                        warn!("Provider {} failed: {}", provider_name, e);
                        None
                    }
                };
                Ok::<_, QuotaError>(page)
            }
        });

        let outcomes: Vec<Result<Option<ProviderPage>, QuotaError>> = join_all(futures).await;
        let mut pages = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            if let Some(page) = outcome? {
                pages.push(page);
            }
        }
        Ok(pages)
    }
}

/// 总数与下一页标记只取自实际返回了结果的页；空页报告的 0 不能压过后续提供方
fn page_signals(pages: &[ProviderPage]) -> (Option<u64>, Option<bool>) {
    let answered = || pages.iter().filter(|p| !p.results.is_empty());
    (
        answered().find_map(|p| p.total_results.filter(|&t| t > 0)),
        answered().find_map(|p| p.has_next_page),
    )
}

fn elapsed(started: Instant) -> f64 {
    started.elapsed().as_secs_f64()
}

/// 按链接保留首次出现者，没有链接的结果之间不去重
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|r| match &r.destination_link {
            Some(link) => seen.insert(link.clone()),
            None => true,
        })
        .collect()
}

/// 检索文本中含任一排除词（不区分大小写）的结果被丢弃
///
/// 占位结果不参与过滤，否则全部被排除时响应既无数据也无占位标记
pub fn apply_exclusions(results: Vec<SearchResult>, keywords: &[String]) -> Vec<SearchResult> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return results;
    }

    results
        .into_iter()
        .filter(|r| {
            if r.is_placeholder() {
                return true;
            }
            let text = r.searchable_text();
            !keywords.iter().any(|k| text.contains(k.as_str()))
        })
        .collect()
}

/// 非权威的示例数据，`source` 与 `provider` 都标记为占位
pub fn placeholder_results(name: &str) -> Vec<SearchResult> {
    let local = name.to_lowercase();
    let samples = [
        (
            "株式会社サンプル",
            "代表取締役",
            "東京都千代田区丸の内1-1-1",
            Some("03-1234-5678"),
            Some(format!("{}@sample.co.jp", local)),
            "https://www.sample.co.jp",
            format!("{}氏は株式会社サンプルの代表取締役として、同社の経営を指揮している。", name),
        ),
        (
            "テクノロジー株式会社",
            "取締役",
            "東京都渋谷区渋谷2-2-2",
            Some("03-9876-5432"),
            None,
            "https://www.technology.co.jp",
            format!("テクノロジー株式会社の取締役として活動している{}氏の経歴について。", name),
        ),
        (
            "未来商事株式会社",
            "営業部長",
            "大阪府大阪市北区梅田3-3-3",
            None,
            Some(format!("{}@mirai-shoji.co.jp", local)),
            "",
            format!(
                "{}氏は未来商事株式会社の営業部長として、関西地区の営業活動を統括している。",
                name
            ),
        ),
    ];

    samples
        .into_iter()
        .map(|(organization, job_title, address, phone, email, link, snippet)| {
            SearchResult::new(
                generate_result_id(PLACEHOLDER_SOURCE),
                name.to_string(),
                PLACEHOLDER_SOURCE,
                PLACEHOLDER_SOURCE.to_string(),
                snippet,
            )
            .with_title(format!("{} - {}", name, organization))
            .with_link(link)
            .with_fields(ExtractedFields {
                organization: Some(organization.to_string()),
                job_title: Some(job_title.to_string()),
                postal_address: Some(address.to_string()),
                phone: phone.map(str::to_string),
                email,
            })
        })
        .collect()
}
