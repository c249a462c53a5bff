// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 占位结果使用的来源标签
pub const PLACEHOLDER_SOURCE: &str = "placeholder";

/// 从标题与摘要中抽取出的结构化字段
///
/// 同一结构也用作提供方原生的结构化提示（structured hints）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    pub organization: Option<String>,
    pub job_title: Option<String>,
    pub postal_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.organization.is_none()
            && self.job_title.is_none()
            && self.postal_address.is_none()
            && self.phone.is_none()
            && self.email.is_none()
    }
}

/// 单条归一化后的搜索命中
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// 单次响应内唯一的 ID
    pub id: String,
    /// 回显的被检索人姓名
    pub name: String,
    pub display_title: Option<String>,
    pub organization: Option<String>,
    pub job_title: Option<String>,
    pub postal_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// 去重键
    pub destination_link: Option<String>,
    /// 来源域名，占位结果为 [`PLACEHOLDER_SOURCE`]
    pub source: String,
    /// 产出该结果的提供方标签
    pub provider: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn new(id: String, name: String, provider: &str, source: String, snippet: String) -> Self {
        Self {
            id,
            name,
            provider: provider.to_string(),
            source,
            snippet,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.display_title = if title.is_empty() { None } else { Some(title) };
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        self.destination_link = if link.is_empty() { None } else { Some(link) };
        self
    }

    pub fn with_fields(mut self, fields: ExtractedFields) -> Self {
        self.organization = fields.organization;
        self.job_title = fields.job_title;
        self.postal_address = fields.postal_address;
        self.phone = fields.phone;
        self.email = fields.email;
        self
    }

    /// 排除关键词过滤所用的文本：标题 + 组织 + 地址 + 摘要，小写
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.display_title.as_deref().unwrap_or(""),
            self.organization.as_deref().unwrap_or(""),
            self.postal_address.as_deref().unwrap_or(""),
            self.snippet
        )
        .to_lowercase()
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == PLACEHOLDER_SOURCE
    }
}

/// 单个提供方一次分页请求的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPage {
    pub results: Vec<SearchResult>,
    /// 提供方声明的总命中数，未声明时为 None
    pub total_results: Option<u64>,
    /// 提供方声明的下一页标志，未声明时为 None
    pub has_next_page: Option<bool>,
}

impl ProviderPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn local(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            total_results: None,
            has_next_page: None,
        }
    }
}

/// 一次人物检索的聚合响应
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_results: u64,
    /// 秒
    pub search_time: f64,
    pub has_next_page: bool,
    pub current_page: u32,
    /// 当日配额已用尽，本次未访问任何提供方
    pub limit_reached: bool,
    /// 结果为占位数据
    pub fallback: bool,
    /// 被排除关键词过滤掉的条数
    pub excluded_count: usize,
}

impl SearchResponse {
    pub fn blocked(page: u32, search_time: f64) -> Self {
        Self {
            results: Vec::new(),
            total_results: 0,
            search_time,
            has_next_page: false,
            current_page: page,
            limit_reached: true,
            fallback: false,
            excluded_count: 0,
        }
    }
}
