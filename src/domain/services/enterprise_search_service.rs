// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::enterprise::{
    EnterpriseSearchRequest, EnterpriseSearchResponse, EnterpriseSearchResult, SourceType,
};
use crate::domain::repositories::quota_repository::QuotaError;
use crate::domain::search::engine::{ProviderKind, SearchError, SemanticErrorKind};
use crate::domain::search::semantic::{
    SemanticHit, SemanticRequest, SemanticSearch, COMPANY_FIELDS, PHONE_FIELDS, POSITION_FIELDS,
};
use crate::domain::services::quota_service::QuotaTracker;
use crate::domain::services::search_service::DEFAULT_MAX_NAME_LENGTH;
use crate::utils::id::generate_result_id;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

const CORPORATE_SITE_BONUS: f64 = 0.2;
const COMPLETENESS_BONUS: f64 = 0.1;

#[derive(Error, Debug)]
pub enum EnterpriseSearchError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("語義検索サービスが設定されていません")]
    NotConfigured,
    #[error("検索リクエストが無効です: {0}")]
    InvalidRequest(String),
    #[error("検索エンジンが見つかりません: {0}")]
    NotFound(String),
    #[error("検索サービスへのアクセス権限がありません: {0}")]
    PermissionDenied(String),
    #[error("検索サービスが一時的に利用できません: {0}")]
    Unavailable(String),
    #[error("検索サービスの利用上限に達しました: {0}")]
    QuotaExhausted(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("検索中にエラーが発生しました: {0}")]
    Other(String),
    #[error("Quota store error: {0}")]
    Quota(#[from] QuotaError),
}

impl From<SearchError> for EnterpriseSearchError {
    fn from(err: SearchError) -> Self {
        let (kind, message) = match err {
            SearchError::Semantic { kind, message } => (kind, message),
            SearchError::HttpStatus { provider, status } => (
                SemanticErrorKind::classify(None, Some(status as i64)),
                format!("{} returned HTTP {}", provider, status),
            ),
            SearchError::NetworkError(message) => return Self::Network(message),
            other => (SemanticErrorKind::Other, other.to_string()),
        };
        match kind {
            SemanticErrorKind::InvalidRequest => Self::InvalidRequest(message),
            SemanticErrorKind::NotFound => Self::NotFound(message),
            SemanticErrorKind::PermissionDenied => Self::PermissionDenied(message),
            SemanticErrorKind::Unavailable => Self::Unavailable(message),
            SemanticErrorKind::QuotaExhausted => Self::QuotaExhausted(message),
            SemanticErrorKind::Other => Self::Other(message),
        }
    }
}

/// 企业信息检索
///
/// 只走语义检索一条路径，出错时按类别原样上抛，不退回占位数据。
pub struct EnterpriseSearchService {
    backend: Option<Arc<dyn SemanticSearch>>,
    quota: Arc<QuotaTracker>,
    max_name_length: usize,
}

impl EnterpriseSearchService {
    pub fn new(backend: Option<Arc<dyn SemanticSearch>>, quota: Arc<QuotaTracker>) -> Self {
        Self {
            backend,
            quota,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn search_enterprise(
        &self,
        request: EnterpriseSearchRequest,
    ) -> Result<EnterpriseSearchResponse, EnterpriseSearchError> {
        let started = Instant::now();
        let request = self.validate(request)?;
        let query = format!("{} {}", request.person_name, request.person_address);

        let backend = self
            .backend
            .as_ref()
            .ok_or(EnterpriseSearchError::NotConfigured)?;

        if !self.quota.record_provider_call().await? {
            warn!("Enterprise search for {} blocked by daily quota", request.person_name);
            return Ok(EnterpriseSearchResponse {
                results: Vec::new(),
                total_count: 0,
                query,
                search_time: started.elapsed().as_millis() as u64,
                limit_reached: true,
            });
        }

        let semantic_request = SemanticRequest::structured(&query, &request.options);
        let hits = backend.search_semantic(&semantic_request).await?;
        info!("Semantic search returned {} hits for {}", hits.len(), query);

        let results: Vec<EnterpriseSearchResult> = hits
            .iter()
            .map(|hit| to_result(hit, &request))
            .collect();
        let results = rank(enhance_confidence(results), request.options.min_confidence);

        Ok(EnterpriseSearchResponse {
            total_count: results.len(),
            results,
            query,
            search_time: started.elapsed().as_millis() as u64,
            limit_reached: false,
        })
    }

    fn validate(
        &self,
        mut request: EnterpriseSearchRequest,
    ) -> Result<EnterpriseSearchRequest, EnterpriseSearchError> {
        request.person_name = request.person_name.trim().to_string();
        request.person_address = request.person_address.trim().to_string();

        if request.person_name.is_empty() {
            return Err(EnterpriseSearchError::ValidationError(
                "personName must not be empty".to_string(),
            ));
        }
        if request.person_address.is_empty() {
            return Err(EnterpriseSearchError::ValidationError(
                "personAddress must not be empty".to_string(),
            ));
        }
        if request.person_name.chars().count() > self.max_name_length {
            return Err(EnterpriseSearchError::ValidationError(format!(
                "personName must be at most {} characters",
                self.max_name_length
            )));
        }
        Ok(request)
    }
}

fn to_result(hit: &SemanticHit, request: &EnterpriseSearchRequest) -> EnterpriseSearchResult {
    let source = SourceType::classify(hit.uri.as_deref().unwrap_or("Unknown"));
    EnterpriseSearchResult {
        id: generate_result_id(ProviderKind::Semantic.tag()),
        person_name: request.person_name.clone(),
        person_address: request.person_address.clone(),
        company_name: hit.field(COMPANY_FIELDS).unwrap_or_default(),
        company_phone: hit.field(PHONE_FIELDS),
        position: hit.field(POSITION_FIELDS),
        source,
        source_url: hit.uri.clone(),
        confidence: hit.confidence(),
        last_updated: Utc::now(),
    }
}

/// 公式サイト由来 +0.2，公司名/电话/职位中两项以上齐全 +0.1，上限 1
pub fn enhance_confidence(results: Vec<EnterpriseSearchResult>) -> Vec<EnterpriseSearchResult> {
    results
        .into_iter()
        .map(|mut result| {
            let mut confidence = result.confidence;
            if result.source == SourceType::CorporateSite {
                confidence += CORPORATE_SITE_BONUS;
            }
            let present = [
                !result.company_name.is_empty(),
                result.company_phone.is_some(),
                result.position.is_some(),
            ]
            .iter()
            .filter(|p| **p)
            .count();
            if present >= 2 {
                confidence += COMPLETENESS_BONUS;
            }
            result.confidence = confidence.clamp(0.0, 1.0);
            result
        })
        .collect()
}

/// 低于阈值的丢弃，按 (公司名, 电话) 去重，再按置信度降序
pub fn rank(results: Vec<EnterpriseSearchResult>, min_confidence: f64) -> Vec<EnterpriseSearchResult> {
    let mut seen = HashSet::new();
    let mut ranked: Vec<EnterpriseSearchResult> = results
        .into_iter()
        .filter(|r| r.confidence >= min_confidence)
        .filter(|r| seen.insert((r.company_name.clone(), r.company_phone.clone())))
        .collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
