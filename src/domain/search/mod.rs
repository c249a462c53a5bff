// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索领域模块
///
/// 定义检索提供方接口、统一的逻辑查询，以及语义检索后端的请求与命中表示
pub mod engine;
pub mod query;
pub mod semantic;
