// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::quota::{QuotaCounter, QuotaLimits, QuotaUsage};
use crate::domain::repositories::quota_repository::{QuotaError, QuotaRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// 每日配额跟踪
///
/// 检索核心只通过它读写配额，不直接接触存储。
pub struct QuotaTracker {
    repository: Arc<dyn QuotaRepository>,
    limits: QuotaLimits,
}

impl QuotaTracker {
    pub fn new(repository: Arc<dyn QuotaRepository>, limits: QuotaLimits) -> Self {
        Self { repository, limits }
    }

    pub fn limits(&self) -> QuotaLimits {
        self.limits
    }

    pub async fn usage(&self) -> Result<QuotaUsage, QuotaError> {
        let state = self.repository.load().await?;
        Ok(QuotaUsage::from_state(&state, &self.limits))
    }

    pub async fn can_search(&self) -> Result<bool, QuotaError> {
        Ok(self.usage().await?.can_search)
    }

    pub async fn can_call_provider(&self) -> Result<bool, QuotaError> {
        Ok(self.usage().await?.can_call_provider)
    }

    /// 记录一次检索提交，已达上限时返回 false 且不计数
    pub async fn record_search(&self) -> Result<bool, QuotaError> {
        self.record(QuotaCounter::Search).await
    }

    /// 记录一次对外请求，已达上限时返回 false 且不计数
    pub async fn record_provider_call(&self) -> Result<bool, QuotaError> {
        self.record(QuotaCounter::ProviderCall).await
    }

    async fn record(&self, counter: QuotaCounter) -> Result<bool, QuotaError> {
        let ceiling = self.limits.ceiling(counter);
        let recorded = self.repository.try_increment(counter, ceiling).await?;
        if recorded {
            debug!("Recorded {} quota usage", counter);
        } else {
            warn!("Daily {} limit ({}) reached", counter, ceiling);
        }
        Ok(recorded)
    }

    pub async fn reset(&self) -> Result<QuotaUsage, QuotaError> {
        let state = self.repository.reset().await?;
        Ok(QuotaUsage::from_state(&state, &self.limits))
    }
}
