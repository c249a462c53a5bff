// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 HTTP 请求体与领域请求之间的转换和校验
pub mod enterprise_search_request;
pub mod search_request;
