// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    domain::{repositories::quota_repository::QuotaError, services::quota_service::QuotaTracker},
    presentation::errors::into_error_response,
};

/// 当天配额使用情况
pub async fn get_usage(Extension(quota): Extension<Arc<QuotaTracker>>) -> impl IntoResponse {
    match quota.usage().await {
        Ok(usage) => (StatusCode::OK, Json(usage)).into_response(),
        Err(e) => into_error_response(e),
    }
}

/// 两个计数都归零
pub async fn reset(Extension(quota): Extension<Arc<QuotaTracker>>) -> impl IntoResponse {
    match quota.reset().await {
        Ok(usage) => (StatusCode::OK, Json(usage)).into_response(),
        Err(e) => into_error_response(e),
    }
}

impl From<QuotaError> for (StatusCode, String) {
    fn from(err: QuotaError) -> Self {
        (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}
