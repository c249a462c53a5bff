// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::quota::{QuotaCounter, QuotaState};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuotaError {
    #[error("配额存储读写失败: {0}")]
    Storage(String),

    #[error("配额数据格式错误: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for QuotaError {
    fn from(err: std::io::Error) -> Self {
        QuotaError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for QuotaError {
    fn from(err: serde_json::Error) -> Self {
        QuotaError::Serialization(err.to_string())
    }
}

/// 返回“今天”的时钟，测试中可替换
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// 以 UTC 日期为日界
pub fn utc_clock() -> Clock {
    Arc::new(|| Utc::now().date_naive())
}

/// 每日配额计数的持久化接口
///
/// 实现必须把一次 `try_increment` 作为不可分割的读-改-写执行，
/// 并在读取时把过期日期的记录归零。
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// 读取当天状态，首次读取时惰性创建
    async fn load(&self) -> Result<QuotaState, QuotaError>;

    /// 计数低于上限时加一并持久化，返回是否加成功
    async fn try_increment(&self, counter: QuotaCounter, ceiling: u32) -> Result<bool, QuotaError>;

    /// 两个计数都归零
    async fn reset(&self) -> Result<QuotaState, QuotaError>;
}
