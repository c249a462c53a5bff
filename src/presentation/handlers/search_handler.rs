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
use validator::Validate;

use crate::{
    application::dto::search_request::PersonSearchRequestDto,
    domain::services::search_service::{SearchService, SearchServiceError},
    presentation::errors::{into_error_response, validation_error},
};

/// 处理人物检索请求
///
/// 住址只在未给出 region/remainder 时拆分一次。零结果与配额耗尽都是成功响应，
/// 后者通过 `limitReached` 标识。
///
/// # 错误
///
/// - 姓名为空或超长：400
/// - 配额存储读写失败：500
pub async fn search_person(
    Extension(service): Extension<Arc<SearchService>>,
    Json(payload): Json<PersonSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e);
    }

    match service.search_person(payload.into_query()).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => into_error_response(e),
    }
}

impl From<SearchServiceError> for (StatusCode, String) {
    fn from(err: SearchServiceError) -> Self {
        match err {
            SearchServiceError::ValidationError(details) => (StatusCode::BAD_REQUEST, details),
            SearchServiceError::Quota(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        }
    }
}
