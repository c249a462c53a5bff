// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{ExtractedFields, ProviderPage, SearchResult};
use crate::domain::search::engine::{ProviderKind, SearchError, SearchProvider};
use crate::domain::search::query::SearchQuery;
use crate::domain::services::entity_extractor::EntityExtractor;
use crate::infrastructure::search::http::ensure_success;
use crate::utils::id::generate_result_id;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const DUCKDUCKGO_URL: &str = "https://api.duckduckgo.com/";
const SOURCE: &str = "duckduckgo.com";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
}

/// DuckDuckGo Instant Answer，无需凭据
///
/// 不分页，最多合成一条结果，只在没有任何其他提供方可用时调用。
pub struct DuckDuckGoSearchEngine {
    client: Client,
    base_url: String,
    extractor: EntityExtractor,
}

impl DuckDuckGoSearchEngine {
    pub fn new(client: Client, base_url: impl Into<String>, extractor: EntityExtractor) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            extractor,
        }
    }

    fn build_query(query: &SearchQuery) -> String {
        format!("\"{}\" 会社 勤務先 役職", query.name.replace('"', ""))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearchEngine {
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError> {
        let q = Self::build_query(query);
        debug!("DuckDuckGo query: {}", q);

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", q.as_str()),
                ("format", "json"),
                ("no_redirect", "1"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;
        let resp = ensure_success(self.name(), resp).await?;
        // 无结果时部分响应的 Content-Type 不是 JSON，按文本解析
        let text = resp.text().await?;
        let answer: InstantAnswer = if text.trim().is_empty() {
            InstantAnswer::default()
        } else {
            serde_json::from_str(&text).map_err(|e| SearchError::InvalidResponse {
                provider: self.name(),
                message: e.to_string(),
            })?
        };

        if answer.abstract_text.trim().is_empty() {
            return Ok(ProviderPage::local(Vec::new()));
        }

        let fields = self.extractor.extract_from(
            &answer.heading,
            &answer.abstract_text,
            ExtractedFields::default(),
        );
        let result = SearchResult::new(
            generate_result_id(self.kind().tag()),
            query.name.clone(),
            self.name(),
            SOURCE.to_string(),
            answer.abstract_text,
        )
        .with_title(answer.heading)
        .with_link(answer.abstract_url)
        .with_fields(fields);

        Ok(ProviderPage::local(vec![result]))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::FallbackWeb
    }
}
