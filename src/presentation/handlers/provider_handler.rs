// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::search::ProviderStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReport {
    pub providers: Vec<ProviderStatus>,
    /// 没有任何带凭据的提供方时，人物检索只能走兜底
    pub fallback_only: bool,
}

/// 各提供方的配置检查结果
pub async fn list_providers(
    Extension(status): Extension<Arc<Vec<ProviderStatus>>>,
) -> Json<ProviderReport> {
    let fallback_only = !status
        .iter()
        .any(|s| s.configured && s.name != "duckduckgo");
    Json(ProviderReport {
        providers: status.as_ref().clone(),
        fallback_only,
    })
}
