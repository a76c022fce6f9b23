mod common;

use anyhow::Result;
use common::{TestApp, TRANSLATOR_PATH};
use httpmock::prelude::*;
use serde_json::{json, Value};

async fn get_config(app: &TestApp) -> Result<Value> {
    Ok(app
        .client
        .get(app.url("/api/dictionary/config"))
        .send()
        .await?
        .json()
        .await?)
}

async fn post_config(app: &TestApp, body: Value) -> Result<reqwest::Response> {
    Ok(app
        .client
        .post(app.url("/api/dictionary/config"))
        .json(&body)
        .send()
        .await?)
}

#[tokio::test]
async fn test_root_banner() -> Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app.client.get(app.url("/")).send().await?.json().await?;
    assert_eq!(body["message"], "生词记录系统 API 服务");

    Ok(())
}

#[tokio::test]
async fn test_default_config_reports_free_dictionary() -> Result<()> {
    let app = TestApp::spawn().await?;

    let config = get_config(&app).await?;
    assert_eq!(config["provider"], "free_dictionary");
    assert_eq!(config["microsoft_configured"], false);
    assert_eq!(config["available_providers"], json!(["free_dictionary", "microsoft"]));

    Ok(())
}

#[tokio::test]
async fn test_invalid_provider_is_rejected_and_config_unchanged() -> Result<()> {
    let app = TestApp::spawn().await?;

    let ok = post_config(&app, json!({ "provider": "microsoft", "microsoft_subscription_key": "k1" })).await?;
    assert_eq!(ok.status().as_u16(), 200);
    let body: Value = ok.json().await?;
    assert_eq!(body["provider"], "microsoft");
    assert_eq!(body["microsoft_configured"], true);

    let rejected = post_config(&app, json!({ "provider": "oxford" })).await?;
    assert_eq!(rejected.status().as_u16(), 400);
    assert!(rejected.json::<Value>().await?["detail"]
        .as_str()
        .unwrap()
        .contains("oxford"));

    let config = get_config(&app).await?;
    assert_eq!(config["provider"], "microsoft");
    assert_eq!(config["microsoft_configured"], true);

    Ok(())
}

#[tokio::test]
async fn test_empty_credentials_do_not_clear_existing_key() -> Result<()> {
    let app = TestApp::spawn_with(|config| {
        config.microsoft_subscription_key = "from-env".into();
    })
    .await?;

    post_config(&app, json!({ "provider": "free_dictionary", "microsoft_subscription_key": "" })).await?;

    let config = get_config(&app).await?;
    assert_eq!(config["provider"], "free_dictionary");
    assert_eq!(config["microsoft_configured"], true);

    Ok(())
}

#[tokio::test]
async fn test_provider_catalog() -> Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app
        .client
        .get(app.url("/api/dictionary/providers"))
        .send()
        .await?
        .json()
        .await?;

    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["id"], "free_dictionary");
    assert_eq!(providers[0]["requires_key"], false);
    assert_eq!(providers[1]["id"], "microsoft");
    assert_eq!(providers[1]["requires_key"], true);

    Ok(())
}

#[tokio::test]
async fn test_microsoft_lookup_retries_in_chinese() -> Result<()> {
    let app = TestApp::spawn().await?;
    post_config(
        &app,
        json!({ "provider": "microsoft", "microsoft_subscription_key": "k1", "microsoft_region": "eastasia" }),
    )
    .await?;

    let lookup_path = format!("{TRANSLATOR_PATH}/dictionary/lookup");
    let english = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(lookup_path.clone())
                .query_param("to", "en")
                .header("ocp-apim-subscription-key", "k1");
            then.status(200).json_body(json!([{ "translations": [] }]));
        })
        .await;
    let chinese = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(lookup_path.clone())
                .query_param("to", "zh")
                .header("ocp-apim-subscription-region", "eastasia")
                .json_body(json!([{ "Text": "book" }]));
            then.status(200).json_body(json!([{
                "translations": [
                    { "displayTarget": "书", "posTag": "NOUN" },
                    { "displayTarget": "预订", "posTag": "VERB" }
                ]
            }]));
        })
        .await;

    let added: Value = app
        .client
        .post(app.url("/api/words"))
        .json(&json!({ "word": "Book" }))
        .send()
        .await?
        .json()
        .await?;

    english.assert_async().await;
    chinese.assert_async().await;
    assert_eq!(added["word"], "book");
    assert_eq!(added["pos_tags"], "NOUN, VERB");
    assert_eq!(added["definitions"][1]["meaning"], "预订");
    assert_eq!(added["pronunciation"], "");

    Ok(())
}

#[tokio::test]
async fn test_lookup_override_uses_microsoft_then_falls_back() -> Result<()> {
    let app = TestApp::spawn().await?;
    // 默认 free_dictionary，且没有 Microsoft 密钥
    let free = app.mock_free_dictionary("river", "A natural stream of water.").await;

    let definition: Value = app
        .client
        .get(app.url("/api/words/river/lookup?provider=microsoft"))
        .send()
        .await?
        .json()
        .await?;

    free.assert_async().await;
    assert_eq!(definition["definitions"][0]["meaning"], "A natural stream of water.");

    Ok(())
}

#[tokio::test]
async fn test_translate_requires_credentials() -> Result<()> {
    let app = TestApp::spawn().await?;

    let response = app
        .client
        .post(app.url("/api/translate"))
        .json(&json!({ "text": "hello" }))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 404);

    Ok(())
}

#[tokio::test]
async fn test_translate_with_configured_key() -> Result<()> {
    let app = TestApp::spawn_with(|config| {
        config.microsoft_subscription_key = "k2".into();
    })
    .await?;
    let path = format!("{TRANSLATOR_PATH}/translate");
    let mock = app
        .mock_server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path)
                .query_param("from", "en")
                .query_param("to", "zh")
                .header("ocp-apim-subscription-key", "k2");
            then.status(200).json_body(json!([{ "translations": [{ "text": "你好", "to": "zh" }] }]));
        })
        .await;

    let body: Value = app
        .client
        .post(app.url("/api/translate"))
        .json(&json!({ "text": "hello" }))
        .send()
        .await?
        .json()
        .await?;

    mock.assert_async().await;
    assert_eq!(
        body,
        json!({ "original_text": "hello", "translated_text": "你好", "from_lang": "en", "to_lang": "zh" })
    );

    Ok(())
}
