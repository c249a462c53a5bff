// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::query::SearchQuery;
use crate::domain::services::address_parser::parse_address;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonSearchRequestDto {
    /// 长度上限在去除首尾空白后由检索服务按配置校验
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    /// 未拆分的住址；给出 region/remainder 时忽略
    pub address: Option<String>,
    pub region: Option<String>,
    pub remainder: Option<String>,
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    #[validate(range(max = 1000))]
    pub page: Option<u32>,
}

impl PersonSearchRequestDto {
    pub fn into_query(self) -> SearchQuery {
        let mut query = SearchQuery::new(self.name)
            .excluding(self.exclude_keywords)
            .page(self.page.unwrap_or(0));

        if self.region.is_some() || self.remainder.is_some() {
            if let Some(region) = self.region {
                query = query.with_region(region);
            }
            if let Some(remainder) = self.remainder {
                query = query.with_remainder(remainder);
            }
        } else if let Some(address) = self.address {
            query = query.with_address(parse_address(&address));
        }
        query
    }
}
