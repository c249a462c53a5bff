// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 检索提供方模块
///
/// 提供 Google Custom Search、Serper、DuckDuckGo 与 Vertex AI Search 的客户端，
/// 以及按配置装配提供方的工厂
pub mod duckduckgo;
pub mod factory;
pub mod google;
pub mod http;
pub mod serper;
pub mod vertex;

pub use factory::{build_providers, provider_status, ProviderRegistry, ProviderStatus};
