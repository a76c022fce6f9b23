use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 单条释义，字段名与前端 / 浏览器插件保持一致 (camelCase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    pub meaning: String,
    #[serde(default)]
    pub example: String,
}

/// 词典查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub word: String,
    pub pronunciation: String,
    pub definitions: Vec<DefinitionEntry>,
    pub examples: Vec<String>,
    pub pos_tags: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    FreeDictionary,
    Microsoft,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::FreeDictionary, ProviderKind::Microsoft];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::FreeDictionary => "free_dictionary",
            ProviderKind::Microsoft => "microsoft",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无效的API提供商: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// 运行期可修改的词典配置，随 AppState 传递，重启后恢复为环境变量默认值
#[derive(Debug, Clone, PartialEq)]
pub struct DictionarySettings {
    pub provider: ProviderKind,
    pub microsoft_subscription_key: String,
    pub microsoft_region: String,
}

impl DictionarySettings {
    pub fn microsoft_configured(&self) -> bool {
        !self.microsoft_subscription_key.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub provider: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DictionaryConfigRequest {
    pub provider: String,
    pub microsoft_subscription_key: Option<String>,
    pub microsoft_region: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryConfigResponse {
    pub provider: ProviderKind,
    pub microsoft_configured: bool,
    pub available_providers: Vec<ProviderKind>,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub id: ProviderKind,
    pub name: &'static str,
    pub description: &'static str,
    pub requires_key: bool,
}

/// 可选词典的静态目录
pub fn provider_catalog() -> Vec<ProviderInfo> {
    vec![
        ProviderInfo {
            id: ProviderKind::FreeDictionary,
            name: "Free Dictionary API",
            description: "免费的英文字典API，提供详细的单词定义、发音和例句",
            requires_key: false,
        },
        ProviderInfo {
            id: ProviderKind::Microsoft,
            name: "Microsoft Translator",
            description: "微软翻译API，支持多语言翻译和词典查询",
            requires_key: true,
        },
    ]
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "zh".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    pub from_lang: String,
    pub to_lang: String,
}
