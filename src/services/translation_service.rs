use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::dictionary::{DictionarySettings, Translation};
use crate::services::dictionary::microsoft::{with_credentials, TextItem, API_VERSION};

#[derive(Debug, Deserialize)]
struct TranslateResult {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    #[serde(default)]
    text: String,
}

/// 基于 Microsoft Translator 的文本翻译，没有备用方案
pub struct TranslationService {
    client: Client,
    base_url: String,
}

impl TranslationService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    /// 任何失败都返回 None，错误只记录日志
    pub async fn translate(
        &self,
        settings: &DictionarySettings,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Option<Translation> {
        match self.request(settings, text, from_lang, to_lang).await {
            Ok(Some(translated_text)) => Some(Translation {
                original_text: text.to_string(),
                translated_text,
                from_lang: from_lang.to_string(),
                to_lang: to_lang.to_string(),
            }),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("!!! 翻译失败: {}", e);
                None
            }
        }
    }

    async fn request(
        &self,
        settings: &DictionarySettings,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<Option<String>, ProviderError> {
        if !settings.microsoft_configured() {
            return Err(ProviderError::MissingCredentials);
        }

        let url = format!("{}/translate", self.base_url.trim_end_matches('/'));
        let request = self
            .client
            .post(url)
            .query(&[("api-version", API_VERSION), ("from", from_lang), ("to", to_lang)])
            .json(&[TextItem { text }]);

        let response = with_credentials(
            request,
            &settings.microsoft_subscription_key,
            &settings.microsoft_region,
        )
        .send()
        .await?;

        if response.status() != StatusCode::OK {
            return Err(ProviderError::Status(response.status()));
        }

        let results: Vec<TranslateResult> = response.json().await?;
        Ok(results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text))
    }
}
