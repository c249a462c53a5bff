// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::ProviderPage;
use crate::domain::search::query::SearchQuery;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// 语义检索提供方返回的错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticErrorKind {
    InvalidRequest,
    NotFound,
    PermissionDenied,
    Unavailable,
    QuotaExhausted,
    Other,
}

impl SemanticErrorKind {
    /// 按 gRPC 状态名、gRPC 数字码或 HTTP 状态码归类
    pub fn classify(status: Option<&str>, code: Option<i64>) -> Self {
        match status {
            Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") => return Self::InvalidRequest,
            Some("NOT_FOUND") => return Self::NotFound,
            Some("PERMISSION_DENIED") | Some("UNAUTHENTICATED") => return Self::PermissionDenied,
            Some("UNAVAILABLE") => return Self::Unavailable,
            Some("RESOURCE_EXHAUSTED") => return Self::QuotaExhausted,
            _ => {}
        }
        match code {
            Some(3) | Some(400) => Self::InvalidRequest,
            Some(5) | Some(404) => Self::NotFound,
            Some(7) | Some(16) | Some(401) | Some(403) => Self::PermissionDenied,
            Some(14) | Some(503) => Self::Unavailable,
            Some(8) | Some(429) => Self::QuotaExhausted,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::Unavailable => "service unavailable",
            Self::QuotaExhausted => "quota exhausted",
            Self::Other => "provider error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error, Clone)]
pub enum SearchError {
    #[error("Search engine error: {0}")]
    EngineError(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Provider {provider} returned HTTP {status}")]
    HttpStatus { provider: &'static str, status: u16 },
    #[error("Malformed response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },
    #[error("Semantic search {kind}: {message}")]
    Semantic {
        kind: SemanticErrorKind,
        message: String,
    },
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::NetworkError(err.to_string())
    }
}

/// 外部检索提供方的封闭集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Custom Search
    PrimaryWeb,
    /// Serper
    SecondaryWeb,
    /// DuckDuckGo Instant Answer，无需凭证
    FallbackWeb,
    /// Vertex AI Search
    Semantic,
}

impl ProviderKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::PrimaryWeb => "google",
            Self::SecondaryWeb => "serper",
            Self::FallbackWeb => "ddg",
            Self::Semantic => "vertex",
        }
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// 发出一次分页请求，并把原生结果映射为统一的 [`ProviderPage`]
    async fn search(&self, query: &SearchQuery) -> Result<ProviderPage, SearchError>;

    /// Get the name of the provider
    fn name(&self) -> &'static str;

    fn kind(&self) -> ProviderKind;
}
