use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::dictionary::{
    provider_catalog, DictionaryConfigRequest, DictionaryConfigResponse, ProviderKind,
    TranslateRequest, Translation,
};
use crate::AppState;

/// 1. 获取当前词典配置
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<DictionaryConfigResponse> {
    let settings = state.settings.read().await;

    Json(DictionaryConfigResponse {
        provider: settings.provider,
        microsoft_configured: settings.microsoft_configured(),
        available_providers: ProviderKind::ALL.to_vec(),
    })
}

/// 2. 更新词典配置，提供商名称无效时保持原配置不变
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DictionaryConfigRequest>,
) -> Result<Json<Value>, AppError> {
    let provider = payload.provider.parse::<ProviderKind>().map_err(|e| {
        tracing::warn!("--- 拒绝无效的词典提供商: {}", payload.provider);
        AppError::Validation(e.to_string())
    })?;

    let mut settings = state.settings.write().await;
    settings.provider = provider;
    if let Some(key) = payload.microsoft_subscription_key.filter(|k| !k.is_empty()) {
        settings.microsoft_subscription_key = key;
    }
    if let Some(region) = payload.microsoft_region.filter(|r| !r.is_empty()) {
        settings.microsoft_region = region;
    }
    tracing::info!("<<< 词典配置已更新: provider={}", provider);

    Ok(Json(json!({
        "message": "配置更新成功",
        "provider": provider,
        "microsoft_configured": settings.microsoft_configured(),
    })))
}

/// 3. 可用的词典提供商
pub async fn list_providers() -> Json<Value> {
    Json(json!({ "providers": provider_catalog() }))
}

/// 4. 文本翻译
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<Translation>, AppError> {
    tracing::info!(">>> 翻译请求: {} -> {}", payload.from_lang, payload.to_lang);

    let settings = state.settings_snapshot().await;
    state
        .translator
        .translate(&settings, &payload.text, &payload.from_lang, &payload.to_lang)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("翻译失败或翻译服务未配置".into()))
}
