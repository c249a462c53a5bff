// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// 企业检索选项
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EnterpriseSearchOptions {
    pub include_company_name: bool,
    pub include_company_phone: bool,
    pub include_position: bool,
    pub min_confidence: f64,
}

impl Default for EnterpriseSearchOptions {
    fn default() -> Self {
        Self {
            include_company_name: true,
            include_company_phone: true,
            include_position: true,
            min_confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseSearchRequest {
    pub person_name: String,
    pub person_address: String,
    #[serde(default)]
    pub options: EnterpriseSearchOptions,
}

/// 命中来源的类型，由来源 URL 的主机名归类
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    ProfessionalNetwork,
    SocialNetwork,
    CorporateSite,
    PressNews,
    GenericWeb,
}

const PROFESSIONAL_HOSTS: &[&str] = &["linkedin.com", "wantedly.com"];
const SOCIAL_HOSTS: &[&str] = &["facebook.com", "twitter.com", "x.com", "instagram.com"];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

impl SourceType {
    pub fn classify(source_url: &str) -> Self {
        let lowered = source_url.to_lowercase();
        let host = Url::parse(&lowered)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| lowered.clone());

        if PROFESSIONAL_HOSTS.iter().any(|d| host_matches(&host, d)) {
            return Self::ProfessionalNetwork;
        }
        if SOCIAL_HOSTS.iter().any(|d| host_matches(&host, d)) {
            return Self::SocialNetwork;
        }
        if host.starts_with("corp.") || host.contains(".corp.") || host.ends_with(".co.jp") {
            return Self::CorporateSite;
        }
        if lowered.contains("news") || lowered.contains("press") {
            return Self::PressNews;
        }
        Self::GenericWeb
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProfessionalNetwork => "ビジネスSNS",
            Self::SocialNetwork => "SNS",
            Self::CorporateSite => "企業公式サイト",
            Self::PressNews => "ニュース・プレスリリース",
            Self::GenericWeb => "Web検索",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseSearchResult {
    pub id: String,
    pub person_name: String,
    pub person_address: String,
    pub company_name: String,
    pub company_phone: Option<String>,
    pub position: Option<String>,
    pub source: SourceType,
    pub source_url: Option<String>,
    /// [0, 1]
    pub confidence: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseSearchResponse {
    pub results: Vec<EnterpriseSearchResult>,
    pub total_count: usize,
    pub query: String,
    /// 毫秒
    pub search_time: u64,
    pub limit_reached: bool,
}
