// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::address::ParsedAddress;

/// 一次人物检索的逻辑查询，所有提供方共用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    pub region: Option<String>,
    pub remainder: Option<String>,
    pub exclude_keywords: Vec<String>,
    /// 从 0 开始的页码
    pub page: u32,
}

impl SearchQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = non_blank(region.into());
        self
    }

    pub fn with_remainder(mut self, remainder: impl Into<String>) -> Self {
        self.remainder = non_blank(remainder.into());
        self
    }

    pub fn with_address(mut self, address: ParsedAddress) -> Self {
        self.region = address.region.and_then(non_blank);
        self.remainder = address.remainder.and_then(non_blank);
        self
    }

    pub fn excluding<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keywords = keywords
            .into_iter()
            .filter_map(|k| non_blank(k.into()))
            .collect();
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// 提供方查询串：姓名、都道府县、其余住址各自加引号做完全匹配，
    /// 排除关键词以 `-"kw"` 形式追加
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![quote(&self.name)];
        if let Some(region) = &self.region {
            parts.push(quote(region));
        }
        if let Some(remainder) = &self.remainder {
            parts.push(quote(remainder));
        }
        for keyword in &self.exclude_keywords {
            parts.push(format!("-{}", quote(keyword)));
        }
        parts.join(" ")
    }

    /// 分页偏移：page × page_size + base_offset，溢出时饱和到 `u32::MAX`
    pub fn offset(&self, page_size: u32, base_offset: u32) -> u32 {
        self.page
            .saturating_mul(page_size)
            .saturating_add(base_offset)
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', ""))
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
