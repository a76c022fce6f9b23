use chrono::{DateTime, Duration, Utc};
use sqlx::{Sqlite, SqlitePool};
use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::models::dictionary::Definition;
use crate::models::word::{Word, WordCreate, WordRecord, WordStats, WordWithProgress};

/// 去除首尾空白并转为小写，作为单词的唯一键
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

pub async fn find_by_text(pool: &SqlitePool, text: &str) -> Result<Option<Word>, sqlx::Error> {
    sqlx::query_as::<_, Word>("SELECT * FROM words WHERE word = ?1")
        .bind(text)
        .fetch_optional(pool)
        .await
}

/// 新增一条学习记录 (每次划词取词一条)
pub async fn insert_record<'e, E>(executor: E, word_id: i64, capture: &WordCreate) -> Result<WordRecord, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, WordRecord>(
        r#"
        INSERT INTO word_records (word_id, source_url, source_context, personal_notes, added_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING *
        "#,
    )
    .bind(word_id)
    .bind(&capture.source_url)
    .bind(&capture.source_context)
    .bind(&capture.personal_notes)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

/// 在同一事务中写入单词和第一条学习记录。
/// 并发插入同一个词时，后到者不会报唯一约束错误，而是把记录挂到已存在的单词上。
pub async fn insert_word_with_record(
    pool: &SqlitePool,
    text: &str,
    definition: &Definition,
    capture: &WordCreate,
) -> Result<(Word, WordRecord), AppError> {
    let definitions = serde_json::to_string(&definition.definitions)?;
    let examples = serde_json::to_string(&definition.examples)?;
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query_as::<_, Word>(
        r#"
        INSERT INTO words (word, pronunciation, definitions, pos_tags, examples, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT(word) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(text)
    .bind(&definition.pronunciation)
    .bind(definitions)
    .bind(&definition.pos_tags)
    .bind(examples)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    let word = match inserted {
        Some(word) => word,
        None => {
            tracing::warn!("--- 单词 [{}] 已被并发写入，复用已有记录", text);
            sqlx::query_as::<_, Word>("SELECT * FROM words WHERE word = ?1")
                .bind(text)
                .fetch_one(&mut *tx)
                .await?
        }
    };

    let record = insert_record(&mut *tx, word.id, capture).await?;
    tx.commit().await?;

    Ok((word, record))
}

/// 分页列出单词，掌握度取自每个单词的第一条学习记录
pub async fn list_words(
    pool: &SqlitePool,
    search: Option<&str>,
    skip: u32,
    limit: u32,
) -> Result<Vec<WordWithProgress>, sqlx::Error> {
    let needle = search
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());

    sqlx::query_as::<_, WordWithProgress>(
        r#"
        SELECT
            w.id, w.word, w.pronunciation, w.definitions, w.pos_tags, w.examples,
            w.created_at, w.updated_at,
            COALESCE(r.mastery_level, 0) AS mastery_level,
            COALESCE(r.review_count, 0) AS review_count
        FROM words w
        LEFT JOIN word_records r
            ON r.id = (SELECT MIN(id) FROM word_records WHERE word_id = w.id)
        WHERE ?1 IS NULL OR instr(w.word, ?1) > 0
        ORDER BY w.id
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(needle)
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(pool)
    .await
}

/// 删除单词及其全部学习记录，单词不存在时返回 false
pub async fn delete_word(pool: &SqlitePool, word_id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM word_records WHERE word_id = ?1")
        .bind(word_id)
        .execute(&mut *tx)
        .await?;
    let deleted = sqlx::query("DELETE FROM words WHERE id = ?1")
        .bind(word_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Ok(false);
    }
    tx.commit().await?;
    Ok(true)
}

/// 更新第一条学习记录的掌握度，复习次数 +1；没有记录时返回 false
pub async fn update_mastery(pool: &SqlitePool, word_id: i64, mastery_level: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE word_records
        SET mastery_level = ?1, review_count = review_count + 1, last_reviewed = ?2
        WHERE id = (SELECT MIN(id) FROM word_records WHERE word_id = ?3)
        "#,
    )
    .bind(mastery_level)
    .bind(Utc::now())
    .bind(word_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn stats(pool: &SqlitePool, now: DateTime<Utc>) -> Result<WordStats, sqlx::Error> {
    let rows = sqlx::query_as::<_, (DateTime<Utc>, i64)>(
        r#"
        SELECT w.created_at, COALESCE(r.mastery_level, 0)
        FROM words w
        LEFT JOIN word_records r
            ON r.id = (SELECT MIN(id) FROM word_records WHERE word_id = w.id)
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(summarize(&rows, now))
}

fn summarize(rows: &[(DateTime<Utc>, i64)], now: DateTime<Utc>) -> WordStats {
    let today = now.date_naive();
    let week_ago = now - Duration::days(7);
    let mut mastery_distribution = BTreeMap::new();

    for (_, level) in rows {
        *mastery_distribution.entry(*level).or_insert(0) += 1;
    }

    WordStats {
        total_words: rows.len() as i64,
        today_words: rows.iter().filter(|(at, _)| at.date_naive() == today).count() as i64,
        week_words: rows.iter().filter(|(at, _)| *at >= week_ago).count() as i64,
        mastery_distribution,
    }
}
