// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器负责一类 API 端点：人物检索、企业检索、配额查询与提供方状态
pub mod enterprise_handler;
pub mod provider_handler;
pub mod quota_handler;
pub mod search_handler;
