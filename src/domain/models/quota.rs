// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 配额计数器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaCounter {
    /// 检索提交次数
    Search,
    /// 对外部提供方的请求次数
    ProviderCall,
}

impl std::fmt::Display for QuotaCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotaCounter::Search => write!(f, "search"),
            QuotaCounter::ProviderCall => write!(f, "provider_call"),
        }
    }
}

/// 按日持久化的配额计数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuotaState {
    pub date: NaiveDate,
    #[serde(default)]
    pub search_count: u32,
    #[serde(default)]
    pub provider_call_count: u32,
}

impl QuotaState {
    pub fn fresh(date: NaiveDate) -> Self {
        Self {
            date,
            search_count: 0,
            provider_call_count: 0,
        }
    }

    /// 日期与 `today` 不同时两个计数都归零
    pub fn rolled_to(self, today: NaiveDate) -> Self {
        if self.date == today {
            self
        } else {
            Self::fresh(today)
        }
    }

    pub fn count(&self, counter: QuotaCounter) -> u32 {
        match counter {
            QuotaCounter::Search => self.search_count,
            QuotaCounter::ProviderCall => self.provider_call_count,
        }
    }

    /// 计数低于上限时加一，返回是否加成功
    pub fn increment_below(&mut self, counter: QuotaCounter, ceiling: u32) -> bool {
        let slot = match counter {
            QuotaCounter::Search => &mut self.search_count,
            QuotaCounter::ProviderCall => &mut self.provider_call_count,
        };
        if *slot >= ceiling {
            return false;
        }
        *slot += 1;
        true
    }
}

/// 每日上限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaLimits {
    pub daily_search_limit: u32,
    pub daily_provider_call_limit: u32,
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            daily_search_limit: 100,
            daily_provider_call_limit: 100,
        }
    }
}

impl QuotaLimits {
    pub fn ceiling(&self, counter: QuotaCounter) -> u32 {
        match counter {
            QuotaCounter::Search => self.daily_search_limit,
            QuotaCounter::ProviderCall => self.daily_provider_call_limit,
        }
    }
}

/// 面向调用方的配额使用概况
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuotaUsage {
    pub date: NaiveDate,
    pub used_searches: u32,
    pub remaining_searches: u32,
    pub search_limit: u32,
    pub provider_calls: u32,
    pub remaining_provider_calls: u32,
    pub provider_call_limit: u32,
    pub usage_percentage: u32,
    pub can_search: bool,
    pub can_call_provider: bool,
}

impl QuotaUsage {
    pub fn from_state(state: &QuotaState, limits: &QuotaLimits) -> Self {
        let usage_percentage = if limits.daily_search_limit == 0 {
            100
        } else {
            ((state.search_count as f64 / limits.daily_search_limit as f64) * 100.0).round() as u32
        };

        Self {
            date: state.date,
            used_searches: state.search_count,
            remaining_searches: limits.daily_search_limit.saturating_sub(state.search_count),
            search_limit: limits.daily_search_limit,
            provider_calls: state.provider_call_count,
            remaining_provider_calls: limits
                .daily_provider_call_limit
                .saturating_sub(state.provider_call_count),
            provider_call_limit: limits.daily_provider_call_limit,
            usage_percentage,
            can_search: state.search_count < limits.daily_search_limit,
            can_call_provider: state.provider_call_count < limits.daily_provider_call_limit,
        }
    }
}
