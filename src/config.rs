use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::models::dictionary::{DictionarySettings, ProviderKind};

pub const DEFAULT_FREE_DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_MICROSOFT_TRANSLATOR_API_URL: &str = "https://api.cognitive.microsofttranslator.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("环境变量 {key} 的值无效: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// 启动配置，全部来自环境变量 (.env 由 dotenvy 预先加载)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub default_provider: ProviderKind,
    pub microsoft_subscription_key: String,
    pub microsoft_region: String,
    pub free_dictionary_api_url: String,
    pub microsoft_translator_api_url: String,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// 按给定的取值函数解析配置，空字符串视为未设置
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host: IpAddr = parse_or(get("HOST"), "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port: u16 = parse_or(get("PORT"), "PORT", 8000)?;
        let default_provider = parse_or(
            get("DICTIONARY_PROVIDER"),
            "DICTIONARY_PROVIDER",
            ProviderKind::FreeDictionary,
        )?;
        let timeout_secs: u64 = parse_or(get("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| "sqlite://vocabulary.db".into()),
            bind_addr: SocketAddr::new(host, port),
            default_provider,
            microsoft_subscription_key: get("MICROSOFT_TRANSLATOR_KEY").unwrap_or_default(),
            microsoft_region: get("MICROSOFT_TRANSLATOR_REGION").unwrap_or_default(),
            free_dictionary_api_url: get("FREE_DICTIONARY_API_URL")
                .unwrap_or_else(|| DEFAULT_FREE_DICTIONARY_API_URL.into()),
            microsoft_translator_api_url: get("MICROSOFT_TRANSLATOR_API_URL")
                .unwrap_or_else(|| DEFAULT_MICROSOFT_TRANSLATOR_API_URL.into()),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 词典配置的初始值
    pub fn dictionary_settings(&self) -> DictionarySettings {
        DictionarySettings {
            provider: self.default_provider,
            microsoft_subscription_key: self.microsoft_subscription_key.clone(),
            microsoft_region: self.microsoft_region.clone(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
