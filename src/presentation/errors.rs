// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 统一的错误响应体 `{"error": ...}`
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(json!({ "error": message.into() }));
    (status, body).into_response()
}

/// 把 `(StatusCode, String)` 形式的错误转成响应
pub fn into_error_response<E>(err: E) -> Response
where
    E: Into<(StatusCode, String)>,
{
    let (status, msg): (StatusCode, String) = err.into();
    error_response(status, msg)
}

/// DTO 校验失败
pub fn validation_error(errors: validator::ValidationErrors) -> Response {
    error_response(StatusCode::BAD_REQUEST, errors.to_string())
}
