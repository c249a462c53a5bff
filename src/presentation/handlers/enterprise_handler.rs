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
    application::dto::enterprise_search_request::EnterpriseSearchRequestDto,
    domain::services::enterprise_search_service::{EnterpriseSearchError, EnterpriseSearchService},
    presentation::errors::{into_error_response, validation_error},
};

/// 处理企业信息检索请求
pub async fn search_enterprise(
    Extension(service): Extension<Arc<EnterpriseSearchService>>,
    Json(payload): Json<EnterpriseSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return validation_error(e);
    }

    match service.search_enterprise(payload.into()).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => into_error_response(e),
    }
}

impl From<EnterpriseSearchError> for (StatusCode, String) {
    fn from(err: EnterpriseSearchError) -> Self {
        let status = match &err {
            EnterpriseSearchError::ValidationError(_) | EnterpriseSearchError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            EnterpriseSearchError::NotConfigured | EnterpriseSearchError::Unavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            EnterpriseSearchError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            EnterpriseSearchError::NotFound(_) => StatusCode::NOT_FOUND,
            EnterpriseSearchError::QuotaExhausted(_) => StatusCode::TOO_MANY_REQUESTS,
            EnterpriseSearchError::Network(_) | EnterpriseSearchError::Other(_) => {
                StatusCode::BAD_GATEWAY
            }
            EnterpriseSearchError::Quota(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, err.to_string())
    }
}
