use anyhow::Context;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_backend::{build_state, config::AppConfig, router::create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 环境变量 (RUST_LOG 也可能写在 .env 中)
    dotenv().ok();

    // 2. 初始化日志系统
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. 读取配置，连接数据库并建表
    let config = AppConfig::from_env()?;
    let shared_state = build_state(&config).await?;
    tracing::info!(
        "词典提供商: {}, Microsoft 密钥: {}",
        config.default_provider,
        if config.microsoft_subscription_key.is_empty() { "未配置" } else { "已配置" }
    );

    // 4. 构建路由
    let app = create_router(shared_state);

    // 5. 启动服务
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("无法监听地址 {}", config.bind_addr))?;
    tracing::info!("🚀 Server started at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
