// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配额存储实现
pub mod file_store;
pub mod memory;

pub use file_store::JsonFileQuotaRepository;
pub use memory::InMemoryQuotaRepository;

use crate::config::settings::{present, QuotaSettings};
use crate::domain::repositories::quota_repository::QuotaRepository;
use std::sync::Arc;
use tracing::info;

/// 配置了 `store_path` 时落盘，否则只在内存中计数
pub fn build_repository(settings: &QuotaSettings) -> Arc<dyn QuotaRepository> {
    match present(&settings.store_path) {
        Some(path) => {
            info!("Persisting daily quota to {}", path);
            Arc::new(JsonFileQuotaRepository::new(path))
        }
        None => {
            info!("Using in-memory daily quota");
            Arc::new(InMemoryQuotaRepository::new())
        }
    }
}
