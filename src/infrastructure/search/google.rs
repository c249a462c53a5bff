// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{ExtractedFields, ProviderPage, SearchResult};
use crate::domain::search::engine::{ProviderKind, SearchError, SearchProvider};
use crate::domain::search::query::SearchQuery;
use crate::domain::services::entity_extractor::EntityExtractor;
use crate::infrastructure::search::http::{ensure_success, host_of, str_field};
use crate::utils::id::generate_result_id;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

pub const GOOGLE_CSE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
    #[serde(rename = "searchInformation")]
    search_information: Option<SearchInformation>,
    queries: Option<GoogleQueries>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    /// 字符串编码的整数
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleQueries {
    #[serde(rename = "nextPage")]
    next_page: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(rename = "displayLink")]
    display_link: Option<String>,
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    organization: Vec<Map<String, Value>>,
    #[serde(default)]
    person: Vec<Map<String, Value>>,
}

impl PageMap {
    /// organization 优先，其次 person
    fn hints(&self) -> ExtractedFields {
        let empty = Map::new();
        let org = self.organization.first().unwrap_or(&empty);
        let person = self.person.first().unwrap_or(&empty);

        ExtractedFields {
            organization: str_field(org, "name").or_else(|| str_field(person, "worksfor")),
            job_title: str_field(person, "jobtitle"),
            postal_address: str_field(org, "address").or_else(|| str_field(person, "address")),
            phone: str_field(org, "telephone").or_else(|| str_field(person, "telephone")),
            email: str_field(person, "email"),
        }
    }
}

/// Google Custom Search JSON API
pub struct GoogleSearchEngine {
    client: Client,
    api_key: String,
    cx: String,
    base_url: String,
    extractor: EntityExtractor,
}

impl GoogleSearchEngine {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        cx: impl Into<String>,
        base_url: impl Into<String>,
        extractor: EntityExtractor,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            cx: cx.into(),
            base_url: base_url.into(),
            extractor,
        }
    }

    fn to_result(&self, query: &SearchQuery, item: GoogleItem) -> SearchResult {
        let hints = item.pagemap.as_ref().map(PageMap::hints).unwrap_or_default();
        let fields = self.extractor.extract_from(&item.title, &item.snippet, hints);
        let source = item
            .display_link
            .clone()
            .filter(|s| !s.is_empty())
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
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchEngine {
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError> {
        let q = query.to_query_string();
        let start = query.offset(PAGE_SIZE, 1).to_string();
        let num = PAGE_SIZE.to_string();
        debug!("Google CSE query: {} (start={})", q, start);

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", q.as_str()),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await?;
        let resp = ensure_success(self.name(), resp).await?;
        let body: GoogleResponse = resp.json().await.map_err(|e| SearchError::InvalidResponse {
            provider: self.name(),
            message: e.to_string(),
        })?;

        if body.items.is_empty() {
            return Ok(ProviderPage {
                results: Vec::new(),
                total_results: Some(0),
                has_next_page: Some(false),
            });
        }

        let total_results = body
            .search_information
            .and_then(|info| info.total_results)
            .and_then(|t| t.parse::<u64>().ok());
        let has_next_page = body
            .queries
            .map(|q| q.next_page.map(|p| !p.is_empty()).unwrap_or(false))
            .unwrap_or(false);

        let results = body
            .items
            .into_iter()
            .map(|item| self.to_result(query, item))
            .collect();

        Ok(ProviderPage {
            results,
            total_results,
            has_next_page: Some(has_next_page),
        })
    }

    fn name(&self) -> &'static str {
        "google"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::PrimaryWeb
    }
}
