//! 集成测试公共工具：在随机端口启动完整服务，
//! 使用临时 SQLite 文件，外部词典与翻译接口由 httpmock 模拟。

// 并非每个测试文件都会用到全部辅助函数
#![allow(unused)]

use anyhow::Result;
use httpmock::prelude::*;
use httpmock::Mock;
use reqwest::Client;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::NamedTempFile;
use tokio::{net::TcpListener, sync::oneshot};

use vocab_backend::{build_state, config::AppConfig, router::create_router};

pub const FREE_DICTIONARY_PATH: &str = "/api/v2/entries/en";
pub const TRANSLATOR_PATH: &str = "/translator";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub db: SqlitePool,
    _db_file: NamedTempFile,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// 启动服务，可在启动前修改配置 (例如预置 Microsoft 密钥)
    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;
        let db_file = NamedTempFile::new()?;

        let mut config = AppConfig::from_source(|_| None)?;
        config.database_url = format!("sqlite://{}", db_file.path().display());
        config.free_dictionary_api_url = mock_server.url(FREE_DICTIONARY_PATH);
        config.microsoft_translator_api_url = mock_server.url(TRANSLATOR_PATH);
        customize(&mut config);

        let state = build_state(&config).await?;
        let db = state.db.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            let server = axum::serve(listener, create_router(state)).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            db,
            _db_file: db_file,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// POST /api/words 并返回响应体
    pub async fn add_word(&self, word: &str) -> Result<Value> {
        let response = self
            .client
            .post(self.url("/api/words"))
            .json(&json!({ "word": word, "source_url": "https://example.com/article" }))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200, "adding {word} should succeed");
        Ok(response.json().await?)
    }

    pub async fn list_words(&self, query: &str) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(self.url(&format!("/api/words{query}")))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
        Ok(response.json().await?)
    }

    pub async fn put_mastery(&self, word_id: i64, level: i64) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(&format!("/api/words/{word_id}/mastery")))
            .query(&[("mastery_level", level)])
            .send()
            .await?)
    }

    pub async fn record_count(&self, word_id: i64) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM word_records WHERE word_id = ?1")
            .bind(word_id)
            .fetch_one(&self.db)
            .await?)
    }

    /// 模拟 Free Dictionary 返回一个名词释义
    pub async fn mock_free_dictionary(&self, word: &str, meaning: &str) -> Mock<'_> {
        let path = format!("{FREE_DICTIONARY_PATH}/{word}");
        let body = json!([{
            "word": word,
            "phonetics": [{"text": "/test/"}],
            "meanings": [{
                "partOfSpeech": "noun",
                "definitions": [{"definition": meaning, "example": format!("An example of {word}.")}]
            }]
        }]);
        self.mock_server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(body);
            })
            .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
