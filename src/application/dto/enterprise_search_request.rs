// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::enterprise::{EnterpriseSearchOptions, EnterpriseSearchRequest};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 检索精度，对应最低置信度
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchPrecision {
    High,
    #[default]
    Standard,
}

impl SearchPrecision {
    pub fn min_confidence(&self) -> f64 {
        match self {
            Self::High => 0.7,
            Self::Standard => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchTargets {
    pub company_name: bool,
    pub company_phone: bool,
    pub position: bool,
}

impl Default for SearchTargets {
    fn default() -> Self {
        Self {
            company_name: true,
            company_phone: true,
            position: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseSearchRequestDto {
    #[validate(length(min = 1, message = "Person name cannot be empty"))]
    pub person_name: String,
    #[validate(length(min = 1, message = "Person address cannot be empty"))]
    pub person_address: String,
    #[serde(default)]
    pub search_precision: SearchPrecision,
    #[serde(default)]
    pub search_targets: SearchTargets,
}

impl From<EnterpriseSearchRequestDto> for EnterpriseSearchRequest {
    fn from(dto: EnterpriseSearchRequestDto) -> Self {
        EnterpriseSearchRequest {
            person_name: dto.person_name,
            person_address: dto.person_address,
            options: EnterpriseSearchOptions {
                include_company_name: dto.search_targets.company_name,
                include_company_phone: dto.search_targets.company_phone,
                include_position: dto.search_targets.position,
                min_confidence: dto.search_precision.min_confidence(),
            },
        }
    }
}
