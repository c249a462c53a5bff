// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{ExtractedFields, ProviderPage, SearchResult};
use crate::domain::search::engine::{ProviderKind, SearchError, SearchProvider};
use crate::domain::search::query::SearchQuery;
use crate::domain::services::entity_extractor::EntityExtractor;
use crate::infrastructure::search::http::{ensure_success, host_of};
use crate::utils::id::generate_result_id;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SERPER_URL: &str = "https://google.serper.dev/search";
const PAGE_SIZE: usize = 10;

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
    num: usize,
    /// 从 1 开始
    page: u32,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperItem>,
}

#[derive(Debug, Deserialize)]
struct SerperItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    domain: Option<String>,
}

/// Serper（Google SERP 代理）
///
/// 不提供权威的总数与翻页信号，这两项都留空交给聚合器处理。
pub struct SerperSearchEngine {
    client: Client,
    api_key: String,
    base_url: String,
    gl: String,
    hl: String,
    extractor: EntityExtractor,
}

impl SerperSearchEngine {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        extractor: EntityExtractor,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            gl: "jp".to_string(),
            hl: "ja".to_string(),
            extractor,
        }
    }

    pub fn with_locale(mut self, gl: impl Into<String>, hl: impl Into<String>) -> Self {
        self.gl = gl.into();
        self.hl = hl.into();
        self
    }
}

#[async_trait]
impl SearchProvider for SerperSearchEngine {
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError> {
        let q = query.to_query_string();
        let page = query.page.saturating_add(1);
        debug!("Serper query: {} (page={})", q, page);

        let body = SerperRequest {
            q: &q,
            gl: &self.gl,
            hl: &self.hl,
            num: PAGE_SIZE,
            page,
        };
        let resp = self
            .client
            .post(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = ensure_success(self.name(), resp).await?;
        let data: SerperResponse = resp.json().await.map_err(|e| SearchError::InvalidResponse {
            provider: self.name(),
            message: e.to_string(),
        })?;

        let results = data
            .organic
            .into_iter()
            .take(PAGE_SIZE)
            .map(|item| {
                let fields =
                    self.extractor
                        .extract_from(&item.title, &item.snippet, ExtractedFields::default());
                let source = item
                    .domain
                    .filter(|d| !d.is_empty())
                    .or_else(|| host_of(&item.link))
                    .unwrap_or_else(|| self.name().to_string());

                SearchResult::new(
                    generate_result_id(self.kind().tag()),
                    query.name.clone(),
                    self.name(),
                    source,
                    item.snippet,
                )
                .with_title(item.title)
                .with_link(item.link)
                .with_fields(fields)
            })
            .collect();

        Ok(ProviderPage::local(results))
    }

    fn name(&self) -> &'static str {
        "serper"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SecondaryWeb
    }
}
