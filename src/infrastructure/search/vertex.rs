// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::{ExtractedFields, ProviderPage, SearchResult};
use crate::domain::search::engine::{ProviderKind, SearchError, SearchProvider, SemanticErrorKind};
use crate::domain::search::query::SearchQuery;
use crate::domain::search::semantic::{
    SemanticHit, SemanticRequest, SemanticSearch, ADDRESS_FIELDS, COMPANY_FIELDS, EMAIL_FIELDS,
    PHONE_FIELDS, POSITION_FIELDS,
};
use crate::domain::services::entity_extractor::EntityExtractor;
use crate::infrastructure::search::http::{host_of, str_field};
use crate::utils::id::generate_result_id;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DISCOVERY_ENGINE_URL: &str = "https://discoveryengine.googleapis.com";
const PROVIDER: &str = "vertex";
const PERSON_PAGE_SIZE: u32 = 10;
const MAX_SNIPPET_COUNT: u32 = 3;

/// 定位一个 serving config 所需的标识
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexEndpoint {
    pub project_id: String,
    pub location: String,
    pub engine_id: String,
    pub serving_config_id: String,
}

impl VertexEndpoint {
    pub fn serving_config_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/collections/default_collection/engines/{}/servingConfigs/{}",
            self.project_id, self.location, self.engine_id, self.serving_config_id
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VertexSearchRequest<'a> {
    serving_config: &'a str,
    query: VertexQuery<'a>,
    page_size: u32,
    offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<&'a str>,
    content_search_spec: ContentSearchSpec,
}

#[derive(Debug, Serialize)]
struct VertexQuery<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentSearchSpec {
    snippet_spec: SnippetSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnippetSpec {
    return_snippet: bool,
    max_snippet_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VertexSearchResponse {
    #[serde(default)]
    results: Vec<VertexResult>,
    total_size: Option<u64>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VertexResult {
    id: Option<String>,
    relevance_score: Option<f64>,
    document: Option<VertexDocument>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VertexDocument {
    uri: Option<String>,
    struct_data: Option<Map<String, Value>>,
    derived_struct_data: Option<DerivedStructData>,
}

#[derive(Debug, Default, Deserialize)]
struct DerivedStructData {
    link: Option<String>,
    title: Option<String>,
    #[serde(default)]
    snippets: Vec<VertexSnippet>,
}

#[derive(Debug, Deserialize)]
struct VertexSnippet {
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<i64>,
    message: Option<String>,
    status: Option<String>,
}

impl From<VertexResult> for SemanticHit {
    fn from(result: VertexResult) -> Self {
        let document = result.document.unwrap_or_default();
        let derived = document.derived_struct_data.unwrap_or_default();
        let snippet = derived
            .snippets
            .into_iter()
            .filter_map(|s| s.snippet)
            .collect::<Vec<_>>()
            .join(" ");

        SemanticHit {
            id: result.id,
            uri: derived.link.or(document.uri),
            title: derived.title,
            snippet,
            struct_data: document.struct_data.unwrap_or_default(),
            relevance_score: result.relevance_score,
        }
    }
}

/// 一次检索的命中页
#[derive(Debug, Default)]
pub struct VertexPage {
    pub hits: Vec<SemanticHit>,
    pub total_size: Option<u64>,
    pub has_next_page: bool,
}

/// Vertex AI Search (Discovery Engine) REST 客户端
///
/// 鉴权只接受外部提供的 bearer token。
pub struct VertexSearchClient {
    client: Client,
    endpoint: VertexEndpoint,
    access_token: String,
    base_url: String,
}

impl VertexSearchClient {
    pub fn new(
        client: Client,
        endpoint: VertexEndpoint,
        access_token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint,
            access_token: access_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &VertexEndpoint {
        &self.endpoint
    }

    pub async fn execute(&self, request: &SemanticRequest) -> Result<VertexPage, SearchError> {
        let serving_config = self.endpoint.serving_config_path();
        let url = format!("{}/v1/{}:search", self.base_url, serving_config);
        let body = VertexSearchRequest {
            serving_config: &serving_config,
            query: VertexQuery {
                text: &request.query,
            },
            page_size: request.page_size,
            offset: request.offset,
            filter: request.filter.as_deref(),
            order_by: request.order_by.as_deref(),
            content_search_spec: ContentSearchSpec {
                snippet_spec: SnippetSpec {
                    return_snippet: true,
                    max_snippet_count: MAX_SNIPPET_COUNT,
                },
            },
        };
        debug!("Vertex AI Search query: {} ({})", request.query, serving_config);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(semantic_error(status.as_u16(), &text));
        }

        let data: VertexSearchResponse =
            resp.json().await.map_err(|e| SearchError::InvalidResponse {
                provider: PROVIDER,
                message: e.to_string(),
            })?;
        info!("Vertex AI Search returned {} results", data.results.len());

        Ok(VertexPage {
            has_next_page: data
                .next_page_token
                .as_deref()
                .map(|t| !t.is_empty())
                .unwrap_or(false),
            total_size: data.total_size,
            hits: data.results.into_iter().map(SemanticHit::from).collect(),
        })
    }
}

/// 错误体里的 status 名优先，其次数值 code，最后是 HTTP 状态码
fn semantic_error(http_status: u16, body: &str) -> SearchError {
    let (kind, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (
            SemanticErrorKind::classify(
                envelope.error.status.as_deref(),
                envelope.error.code.or(Some(http_status as i64)),
            ),
            envelope
                .error
                .message
                .unwrap_or_else(|| format!("HTTP {}", http_status)),
        ),
        Err(_) => (
            SemanticErrorKind::classify(None, Some(http_status as i64)),
            body.chars().take(512).collect(),
        ),
    };
    warn!("Vertex AI Search failed ({}): {}", kind, message);
    SearchError::Semantic { kind, message }
}

#[async_trait]
impl SemanticSearch for VertexSearchClient {
    async fn search_semantic(
        &self,
        request: &SemanticRequest,
    ) -> Result<Vec<SemanticHit>, SearchError> {
        Ok(self.execute(request).await?.hits)
    }
}

/// 人物检索里作为语义类提供方使用的适配器
pub struct VertexSearchEngine {
    client: Arc<VertexSearchClient>,
    extractor: EntityExtractor,
}

impl VertexSearchEngine {
    pub fn new(client: Arc<VertexSearchClient>, extractor: EntityExtractor) -> Self {
        Self { client, extractor }
    }

    fn hints(hit: &SemanticHit) -> ExtractedFields {
        let pick = |names: &[&str]| names.iter().find_map(|n| str_field(&hit.struct_data, n));
        ExtractedFields {
            organization: pick(COMPANY_FIELDS),
            job_title: pick(POSITION_FIELDS),
            postal_address: pick(ADDRESS_FIELDS),
            phone: pick(PHONE_FIELDS),
            email: pick(EMAIL_FIELDS),
        }
    }
}

#[async_trait]
impl SearchProvider for VertexSearchEngine {
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError> {
        let mut request = SemanticRequest::new(query.to_query_string(), PERSON_PAGE_SIZE);
        request.offset = query.offset(PERSON_PAGE_SIZE, 0);
        let page = self.client.execute(&request).await?;

        let results = page
            .hits
            .into_iter()
            .map(|hit| {
                let title = hit.title.clone().unwrap_or_default();
                let fields = self.extractor.extract_from(&title, &hit.snippet, Self::hints(&hit));
                let link = hit.uri.clone().unwrap_or_default();
                let source = host_of(&link).unwrap_or_else(|| PROVIDER.to_string());

                SearchResult::new(
                    generate_result_id(self.kind().tag()),
                    query.name.clone(),
                    self.name(),
                    source,
                    hit.snippet,
                )
                .with_title(title)
                .with_link(link)
                .with_fields(fields)
            })
            .collect();

        Ok(ProviderPage {
            results,
            total_results: page.total_size,
            has_next_page: Some(page.has_next_page),
        })
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Semantic
    }
}
