use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::DictionaryProvider;
use crate::errors::ProviderError;
use crate::models::dictionary::{Definition, DefinitionEntry, ProviderKind};

pub const API_VERSION: &str = "3.0";

/// Translator 接口统一的请求体 `[{"Text": ...}]`
#[derive(Debug, Serialize)]
pub(crate) struct TextItem<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    #[serde(default)]
    translations: Vec<LookupTranslation>,
}

#[derive(Debug, Deserialize)]
struct LookupTranslation {
    #[serde(rename = "posTag", default)]
    pos_tag: Option<String>,
    #[serde(rename = "displayTarget", default)]
    display_target: String,
}

/// 附加订阅密钥与区域请求头，区域为空时不发送
pub(crate) fn with_credentials(request: RequestBuilder, key: &str, region: &str) -> RequestBuilder {
    let request = request.header("Ocp-Apim-Subscription-Key", key);
    if region.is_empty() {
        request
    } else {
        request.header("Ocp-Apim-Subscription-Region", region)
    }
}

/// Microsoft Translator 词典查询，需要订阅密钥
pub struct MicrosoftDictionaryProvider {
    client: Client,
    base_url: String,
    subscription_key: String,
    region: String,
}

impl MicrosoftDictionaryProvider {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        subscription_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            subscription_key: subscription_key.into(),
            region: region.into(),
        }
    }

    /// 单次 dictionary/lookup 调用；非 200 视为没有结果
    async fn lookup_to(&self, word: &str, to: &str) -> Result<Vec<DefinitionEntry>, ProviderError> {
        let url = format!("{}/dictionary/lookup", self.base_url.trim_end_matches('/'));
        let request = self
            .client
            .post(url)
            .query(&[("api-version", API_VERSION), ("from", "en"), ("to", to)])
            .json(&[TextItem { text: word }]);

        let response = with_credentials(request, &self.subscription_key, &self.region)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            tracing::warn!("--- Microsoft 词典查询 en->{} 返回状态码 {}", to, response.status());
            return Ok(Vec::new());
        }

        let results: Vec<LookupResult> = response.json().await?;
        Ok(collect_entries(results))
    }
}

fn collect_entries(results: Vec<LookupResult>) -> Vec<DefinitionEntry> {
    results
        .into_iter()
        .next()
        .map(|result| {
            result
                .translations
                .into_iter()
                .filter(|t| !t.display_target.is_empty())
                .map(|t| DefinitionEntry {
                    part_of_speech: t.pos_tag.unwrap_or_else(|| "noun".to_string()),
                    meaning: t.display_target,
                    example: String::new(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn join_pos_tags(entries: &[DefinitionEntry]) -> String {
    let mut tags: Vec<&str> = Vec::new();
    for entry in entries {
        if !tags.contains(&entry.part_of_speech.as_str()) {
            tags.push(&entry.part_of_speech);
        }
    }
    tags.join(", ")
}

#[async_trait]
impl DictionaryProvider for MicrosoftDictionaryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Microsoft
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<Definition>, ProviderError> {
        if self.subscription_key.is_empty() {
            return Err(ProviderError::MissingCredentials);
        }

        // 先查英英 (同义词/释义)，无结果再查英中
        let mut entries = self.lookup_to(word, "en").await?;
        if entries.is_empty() {
            entries = self.lookup_to(word, "zh").await?;
        }
        if entries.is_empty() {
            return Ok(None);
        }

        Ok(Some(Definition {
            word: word.to_string(),
            pronunciation: String::new(),
            pos_tags: join_pos_tags(&entries),
            definitions: entries,
            examples: Vec::new(),
        }))
    }
}
