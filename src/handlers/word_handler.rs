use axum::{extract::{Path, Query, State}, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::dictionary::{Definition, LookupQuery};
use crate::models::word::{ListWordsQuery, MasteryQuery, WordCreate, WordResponse, WordStats};
use crate::services::word_service;
use crate::AppState;

/// 1. 查询单词释义 (不入库)
pub async fn lookup_word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Definition>, AppError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(AppError::NotFound("未找到该单词的释义".into()));
    }
    tracing::info!(">>> 查询单词: {}, provider={:?}", word, query.provider);

    let settings = state.settings_snapshot().await;
    let definition = state
        .dictionary
        .lookup(&settings, word, query.provider.as_deref())
        .await;

    Ok(Json(definition))
}

/// 2. 添加生词 (已存在的词只追加一条学习记录)
pub async fn add_word(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WordCreate>,
) -> Result<Json<WordResponse>, AppError> {
    let text = word_service::normalize(&payload.word);
    if text.is_empty() {
        return Err(AppError::Validation("单词不能为空".into()));
    }
    tracing::info!(">>> 添加生词: {}", text);

    if let Some(existing) = word_service::find_by_text(&state.db, &text).await? {
        let record = word_service::insert_record(&state.db, existing.id, &payload).await?;
        tracing::info!("<<< 单词 [{}] 已存在, 新增学习记录 ID={}", text, record.id);
        return Ok(Json(WordResponse::from_word(existing, 0, 0)));
    }

    let settings = state.settings_snapshot().await;
    let definition = state.dictionary.lookup(&settings, &text, None).await;

    let (word, record) =
        word_service::insert_word_with_record(&state.db, &text, &definition, &payload).await?;
    tracing::info!("<<< 新单词入库: ID={}, word={}, 记录 ID={}", word.id, word.word, record.id);

    Ok(Json(WordResponse::from_word(word, 0, 0)))
}

/// 3. 获取生词列表
pub async fn list_words(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListWordsQuery>,
) -> Result<Json<Vec<WordResponse>>, AppError> {
    let rows = word_service::list_words(&state.db, query.search.as_deref(), query.skip, query.limit).await?;
    tracing::debug!("<<< 生词列表获取完毕, 数量: {}", rows.len());

    Ok(Json(rows.into_iter().map(WordResponse::from).collect()))
}

/// 4. 删除生词 (连同全部学习记录)
pub async fn delete_word(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(">>> 删除生词: ID={}", id);

    if !word_service::delete_word(&state.db, id).await? {
        tracing::warn!("--- 尝试删除不存在的单词: ID={}", id);
        return Err(AppError::NotFound("未找到该单词".into()));
    }

    Ok(Json(json!({ "message": "删除成功" })))
}

/// 5. 更新掌握程度
pub async fn update_mastery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<MasteryQuery>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(">>> 更新掌握程度: ID={}, level={}", id, query.mastery_level);

    if !word_service::update_mastery(&state.db, id, query.mastery_level).await? {
        tracing::warn!("--- 单词 ID={} 没有学习记录", id);
        return Err(AppError::NotFound("未找到学习记录".into()));
    }

    Ok(Json(json!({ "message": "更新成功" })))
}

/// 6. 学习统计
pub async fn word_stats(State(state): State<Arc<AppState>>) -> Result<Json<WordStats>, AppError> {
    let stats = word_service::stats(&state.db, chrono::Utc::now()).await?;
    Ok(Json(stats))
}
