// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::engine::SearchError;
use reqwest::{Client, Response};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::warn;
use url::Url;

const USER_AGENT: &str = concat!("kensaku/", env!("CARGO_PKG_VERSION"));

/// 所有提供方共用的 HTTP 客户端
pub fn build_client(timeout: Duration) -> Result<Client, SearchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| SearchError::NetworkError(format!("Failed to create HTTP client: {}", e)))
}

/// 非 2xx 响应转为 `SearchError::HttpStatus`，响应体只记日志
pub async fn ensure_success(provider: &'static str, resp: Response) -> Result<Response, SearchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(512).collect();
    warn!("{} http {}: {}", provider, status, snippet);
    Err(SearchError::HttpStatus {
        provider,
        status: status.as_u16(),
    })
}

/// 结构化字段里取非空字符串
pub fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

pub fn host_of(link: &str) -> Option<String> {
    Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
}
