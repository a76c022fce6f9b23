pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

use anyhow::Context;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use config::AppConfig;
use models::dictionary::DictionarySettings;
use services::dictionary::DictionaryService;
use services::translation_service::TranslationService;

/// 全局状态，Handler 通过 `State<Arc<AppState>>` 获取
pub struct AppState {
    pub db: SqlitePool,
    pub dictionary: DictionaryService,
    pub translator: TranslationService,
    /// 词典提供商与密钥，可通过 /api/dictionary/config 在运行期修改
    pub settings: RwLock<DictionarySettings>,
}

impl AppState {
    /// 复制一份当前配置，避免在外部请求期间持有锁
    pub async fn settings_snapshot(&self) -> DictionarySettings {
        self.settings.read().await.clone()
    }
}

/// 连接数据库、建表并初始化外部接口客户端
pub async fn build_state(config: &AppConfig) -> anyhow::Result<Arc<AppState>> {
    let db = db::connect(&config.database_url)
        .await
        .with_context(|| format!("无法连接数据库: {}", config.database_url))?;
    db::init_schema(&db).await.context("建表失败")?;

    let client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("无法创建 HTTP 客户端")?;

    Ok(Arc::new(AppState {
        db,
        dictionary: DictionaryService::new(
            client.clone(),
            config.free_dictionary_api_url.clone(),
            config.microsoft_translator_api_url.clone(),
        ),
        translator: TranslationService::new(client, config.microsoft_translator_api_url.clone()),
        settings: RwLock::new(config.dictionary_settings()),
    }))
}
