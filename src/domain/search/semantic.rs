// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::enterprise::EnterpriseSearchOptions;
use crate::domain::search::engine::SearchError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const COMPANY_FIELDS: &[&str] = &["company_name", "会社名", "organization"];
pub const PHONE_FIELDS: &[&str] = &["phone", "telephone", "電話番号", "tel"];
pub const POSITION_FIELDS: &[&str] = &["position", "title", "役職", "肩書き"];
pub const ADDRESS_FIELDS: &[&str] = &["address", "住所", "location"];
pub const EMAIL_FIELDS: &[&str] = &["email", "mail", "メール"];

const COMPANY_KEYWORDS: &[&str] = &["会社名", "勤務先", "company"];
const PHONE_KEYWORDS: &[&str] = &["電話番号", "phone", "tel"];
const POSITION_KEYWORDS: &[&str] = &["役職", "肩書き", "position", "部長", "課長", "取締役"];

/// 摘要中 `键[：:]值` 形式的匹配模式，每个已登记的键编译一次
static SNIPPET_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [
        COMPANY_FIELDS,
        PHONE_FIELDS,
        POSITION_FIELDS,
        ADDRESS_FIELDS,
        EMAIL_FIELDS,
    ]
    .into_iter()
    .flatten()
    .filter_map(|name| {
        let pattern = format!(r"(?i){}[：:\s]*([^\s,]+)", regex::escape(name));
        Regex::new(&pattern).ok().map(|re| (*name, re))
    })
    .collect()
});

/// 企业检索固定请求前 20 条
pub const STRUCTURED_PAGE_SIZE: u32 = 20;

/// 一次语义检索请求的参数
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticRequest {
    pub query: String,
    pub page_size: u32,
    pub offset: u32,
    pub filter: Option<String>,
    pub order_by: Option<String>,
}

impl SemanticRequest {
    pub fn new(query: impl Into<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            offset: 0,
            filter: None,
            order_by: None,
        }
    }

    /// 企业检索：姓名 + 住址 + 各选项对应的关键词簇，按 confidence 降序取前 20 条
    pub fn structured(person_query: &str, options: &EnterpriseSearchOptions) -> Self {
        let mut parts: Vec<&str> = vec![person_query];
        if options.include_company_name {
            parts.extend_from_slice(COMPANY_KEYWORDS);
        }
        if options.include_company_phone {
            parts.extend_from_slice(PHONE_KEYWORDS);
        }
        if options.include_position {
            parts.extend_from_slice(POSITION_KEYWORDS);
        }

        let filter = if options.min_confidence > 0.0 {
            Some(format!("confidence >= {}", options.min_confidence))
        } else {
            None
        };

        Self {
            query: parts.join(" "),
            page_size: STRUCTURED_PAGE_SIZE,
            offset: 0,
            filter,
            order_by: Some("confidence desc".to_string()),
        }
    }
}

/// 语义检索返回的单条命中
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticHit {
    pub id: Option<String>,
    pub uri: Option<String>,
    pub title: Option<String>,
    pub snippet: String,
    pub struct_data: Map<String, Value>,
    pub relevance_score: Option<f64>,
}

impl SemanticHit {
    /// 先查结构化数据中的候选键，再用 `键[：:]值` 形式在摘要中匹配；
    /// 摘要匹配只覆盖 `*_FIELDS` 中登记的键
    pub fn field(&self, names: &[&str]) -> Option<String> {
        for name in names {
            match self.struct_data.get(*name) {
                Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
                Some(Value::Number(n)) => return Some(n.to_string()),
                _ => {}
            }
        }

        names
            .iter()
            .filter_map(|name| SNIPPET_PATTERNS.get(*name))
            .filter_map(|re| re.captures(&self.snippet))
            .filter_map(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
            .find(|value| !value.is_empty())
    }

    /// relevanceScore / 100 截断到 [0, 1]
    pub fn confidence(&self) -> f64 {
        let score = self.relevance_score.unwrap_or(0.0);
        (score / 100.0).clamp(0.0, 1.0)
    }
}

/// 语义检索后端（Vertex AI Search 等）
#[async_trait]
pub trait SemanticSearch: Send + Sync {
    async fn search_semantic(&self, request: &SemanticRequest)
        -> Result<Vec<SemanticHit>, SearchError>;
}
