// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::quota::{QuotaCounter, QuotaState};
use crate::domain::repositories::quota_repository::{utc_clock, Clock, QuotaError, QuotaRepository};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// 以单个 JSON 文件持久化的配额存储
///
/// 文件内容形如 `{"date":"2026-10-16","searchCount":3,"providerCallCount":5}`。
/// 所有读-改-写都在同一把锁内完成，写入先落到临时文件再改名。
pub struct JsonFileQuotaRepository {
    path: PathBuf,
    lock: Mutex<()>,
    clock: Clock,
}

impl JsonFileQuotaRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, utc_clock())
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Clock) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<QuotaState, QuotaError> {
        let today = (self.clock)();
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let state: QuotaState = serde_json::from_slice(&bytes)?;
                Ok(state.rolled_to(today))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(QuotaState::fresh(today)),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, state: &QuotaState) -> Result<(), QuotaError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(state)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Persisted quota state to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl QuotaRepository for JsonFileQuotaRepository {
    async fn load(&self) -> Result<QuotaState, QuotaError> {
        let _guard = self.lock.lock().await;
        let state = self.read().await?;
        self.write(&state).await?;
        Ok(state)
    }

    async fn try_increment(&self, counter: QuotaCounter, ceiling: u32) -> Result<bool, QuotaError> {
        let _guard = self.lock.lock().await;
        let mut state = self.read().await?;
        let incremented = state.increment_below(counter, ceiling);
        self.write(&state).await?;
        Ok(incremented)
    }

    async fn reset(&self) -> Result<QuotaState, QuotaError> {
        let _guard = self.lock.lock().await;
        let state = QuotaState::fresh((self.clock)());
        self.write(&state).await?;
        Ok(state)
    }
}
