//! 词典查询：按配置选择提供商，失败时依次降级到备用词典和本地兜底释义。

pub mod fallback;
pub mod free_dictionary;
pub mod microsoft;

use async_trait::async_trait;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::models::dictionary::{Definition, DictionarySettings, ProviderKind};
use free_dictionary::FreeDictionaryProvider;
use microsoft::MicrosoftDictionaryProvider;

#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// `Ok(None)` 表示查无此词，`Err` 表示接口调用失败
    async fn lookup_word(&self, word: &str) -> Result<Option<Definition>, ProviderError>;
}

/// 已知的覆盖值优先，未知或缺省时使用当前默认提供商
pub fn select_provider(default: ProviderKind, provider_override: Option<&str>) -> ProviderKind {
    provider_override
        .and_then(|name| name.parse::<ProviderKind>().ok())
        .unwrap_or(default)
}

pub struct DictionaryService {
    client: Client,
    free_dictionary_url: String,
    microsoft_url: String,
}

impl DictionaryService {
    pub fn new(client: Client, free_dictionary_url: impl Into<String>, microsoft_url: impl Into<String>) -> Self {
        Self {
            client,
            free_dictionary_url: free_dictionary_url.into(),
            microsoft_url: microsoft_url.into(),
        }
    }

    pub fn provider(&self, kind: ProviderKind, settings: &DictionarySettings) -> Box<dyn DictionaryProvider> {
        match kind {
            ProviderKind::FreeDictionary => Box::new(FreeDictionaryProvider::new(
                self.client.clone(),
                self.free_dictionary_url.clone(),
            )),
            ProviderKind::Microsoft => Box::new(MicrosoftDictionaryProvider::new(
                self.client.clone(),
                self.microsoft_url.clone(),
                settings.microsoft_subscription_key.clone(),
                settings.microsoft_region.clone(),
            )),
        }
    }

    /// 查询单词释义，总会返回结果：
    /// 1. 选定的提供商
    /// 2. 选定 Microsoft 时，降级到 Free Dictionary
    /// 3. 本地兜底释义
    pub async fn lookup(
        &self,
        settings: &DictionarySettings,
        word: &str,
        provider_override: Option<&str>,
    ) -> Definition {
        let selected = select_provider(settings.provider, provider_override);

        if let Some(definition) = self.try_provider(selected, settings, word).await {
            return definition;
        }

        if selected == ProviderKind::Microsoft {
            if let Some(definition) = self.try_provider(ProviderKind::FreeDictionary, settings, word).await {
                return definition;
            }
        }

        tracing::info!("--- 所有词典均未返回结果，使用兜底释义: {}", word);
        fallback::synthesize(word)
    }

    async fn try_provider(&self, kind: ProviderKind, settings: &DictionarySettings, word: &str) -> Option<Definition> {
        let provider = self.provider(kind, settings);
        let kind = provider.kind();
        match provider.lookup_word(word).await {
            Ok(Some(definition)) => {
                tracing::debug!("<<< {} 命中: {}", kind, word);
                Some(definition)
            }
            Ok(None) => {
                tracing::debug!("--- {} 未收录: {}", kind, word);
                None
            }
            Err(e) => {
                tracing::warn!("!!! {} 查询失败: word={}, Error: {}", kind, word, e);
                None
            }
        }
    }
}
