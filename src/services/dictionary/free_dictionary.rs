use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use super::DictionaryProvider;
use crate::errors::ProviderError;
use crate::models::dictionary::{Definition, DefinitionEntry, ProviderKind};

/// dictionaryapi.dev 返回的词条 (只取用到的字段)
#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(default)]
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

/// 免费公共词典，无需密钥
pub struct FreeDictionaryProvider {
    client: Client,
    base_url: String,
}

impl FreeDictionaryProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self { client, base_url: base_url.into() }
    }

    fn entry_url(&self, word: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl DictionaryProvider for FreeDictionaryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FreeDictionary
    }

    async fn lookup_word(&self, word: &str) -> Result<Option<Definition>, ProviderError> {
        let response = self.client.get(self.entry_url(word)?).send().await?;

        match response.status() {
            StatusCode::OK => {
                let entries: Vec<Entry> = response.json().await?;
                Ok(build_definition(word, entries))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(ProviderError::Status(status)),
        }
    }
}

/// 只使用第一个词条；没有任何释义时视为查无此词
fn build_definition(word: &str, entries: Vec<Entry>) -> Option<Definition> {
    let entry = entries.into_iter().next()?;

    let mut definitions = Vec::new();
    let mut examples = Vec::new();
    let mut pos_tags: Vec<String> = Vec::new();

    for meaning in entry.meanings {
        let pos = meaning.part_of_speech;
        if !pos.is_empty() && !pos_tags.contains(&pos) {
            pos_tags.push(pos.clone());
        }

        for sense in meaning.definitions {
            let example = sense.example.unwrap_or_default();
            if !example.is_empty() {
                examples.push(example.clone());
            }
            definitions.push(DefinitionEntry {
                part_of_speech: pos.clone(),
                meaning: sense.definition,
                example,
            });
        }
    }

    if definitions.is_empty() {
        return None;
    }

    let pronunciation = entry
        .phonetics
        .into_iter()
        .filter_map(|p| p.text)
        .chain(entry.phonetic)
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    Some(Definition {
        word: word.to_string(),
        pronunciation,
        definitions,
        examples,
        pos_tags: pos_tags.join(", "),
    })
}
