use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use chrono::{DateTime, Utc};

use super::dictionary::DefinitionEntry;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Word {
    pub id: i64,
    pub word: String,
    pub pronunciation: Option<String>,
    pub definitions: String, // JSON 数组，元素为 DefinitionEntry
    pub pos_tags: Option<String>,
    pub examples: String,    // JSON 字符串数组
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 单词 + 其第一条学习记录上的掌握度
#[derive(Debug, FromRow)]
pub struct WordWithProgress {
    #[sqlx(flatten)]
    pub word: Word,
    pub mastery_level: i64,
    pub review_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WordRecord {
    pub id: i64,
    pub word_id: i64,
    pub source_url: Option<String>,
    pub source_context: Option<String>,
    pub personal_notes: Option<String>,
    pub mastery_level: i64,
    pub review_count: i64,
    pub last_reviewed: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct WordCreate {
    pub word: String,
    pub source_url: Option<String>,
    pub source_context: Option<String>,
    pub personal_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordResponse {
    pub id: i64,
    pub word: String,
    pub pronunciation: Option<String>,
    pub definitions: Vec<DefinitionEntry>,
    pub examples: Vec<String>,
    pub pos_tags: Option<String>,
    pub mastery_level: i64,
    pub review_count: i64,
    pub created_at: DateTime<Utc>,
}

impl WordResponse {
    /// 将数据库行还原为接口结构，JSON 列解析失败时按空列表处理
    pub fn from_word(word: Word, mastery_level: i64, review_count: i64) -> Self {
        Self {
            id: word.id,
            definitions: serde_json::from_str(&word.definitions).unwrap_or_default(),
            examples: serde_json::from_str(&word.examples).unwrap_or_default(),
            word: word.word,
            pronunciation: word.pronunciation,
            pos_tags: word.pos_tags,
            mastery_level,
            review_count,
            created_at: word.created_at,
        }
    }
}

impl From<WordWithProgress> for WordResponse {
    fn from(row: WordWithProgress) -> Self {
        WordResponse::from_word(row.word, row.mastery_level, row.review_count)
    }
}

#[derive(Debug, Deserialize)]
pub struct ListWordsQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub search: Option<String>,
}

fn default_limit() -> u32 {
    100
}

#[derive(Debug, Deserialize)]
pub struct MasteryQuery {
    pub mastery_level: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordStats {
    pub total_words: i64,
    pub today_words: i64,
    pub week_words: i64,
    pub mastery_distribution: std::collections::BTreeMap<i64, i64>,
}
