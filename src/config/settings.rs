// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、检索、各提供方凭据和配额等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 检索行为配置
    pub search: SearchSettings,
    /// Google Custom Search 配置
    pub google_search: GoogleSearchSettings,
    /// Serper 配置
    pub serper: SerperSettings,
    /// DuckDuckGo 配置
    pub duckduckgo: DuckDuckGoSettings,
    /// Vertex AI Search 配置
    pub vertex: VertexSettings,
    /// 每日配额配置
    pub quota: QuotaSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub page_size: u32,
    /// 单个提供方请求的超时时间（秒）
    pub request_timeout_secs: u64,
    pub max_name_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSearchSettings {
    pub api_key: Option<String>,
    /// Programmable Search Engine ID
    pub cx: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerperSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub gl: String,
    pub hl: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuckDuckGoSettings {
    pub enabled: bool,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VertexSettings {
    pub project_id: Option<String>,
    pub location: String,
    pub engine_id: Option<String>,
    pub serving_config_id: String,
    /// OAuth2 bearer token，由外部签发
    pub access_token: Option<String>,
    pub base_url: String,
}

/// 配额配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSettings {
    pub daily_search_limit: u32,
    pub daily_provider_call_limit: u32,
    /// 配置后使用 JSON 文件持久化，否则只保存在内存里
    pub store_path: Option<String>,
}

/// 空字符串与缺失同等对待
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 和 `KENSAKU__` 前缀的环境变量
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("KENSAKU").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 默认值之上叠加一段 TOML
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("search.page_size", 10)?
            .set_default("search.request_timeout_secs", 30)?
            .set_default("search.max_name_length", 50)?
            .set_default(
                "google_search.base_url",
                "https://www.googleapis.com/customsearch/v1",
            )?
            .set_default("serper.base_url", "https://google.serper.dev/search")?
            .set_default("serper.gl", "jp")?
            .set_default("serper.hl", "ja")?
            .set_default("duckduckgo.enabled", true)?
            .set_default("duckduckgo.base_url", "https://api.duckduckgo.com/")?
            .set_default("vertex.location", "global")?
            .set_default("vertex.serving_config_id", "default_config")?
            .set_default("vertex.base_url", "https://discoveryengine.googleapis.com")?
            .set_default("quota.daily_search_limit", 100)?
            .set_default("quota.daily_provider_call_limit", 100)
    }
}
