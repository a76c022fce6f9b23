use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 接口层统一错误，转换为 `{"detail": ...}` 响应体
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("数据序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("!!! 数据库异常: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Serialization(e) => {
                tracing::error!("!!! 序列化异常: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// 外部词典 / 翻译接口错误，只在服务层内部流转，不会直接返回给调用方
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("接口返回异常状态码: {0}")]
    Status(reqwest::StatusCode),
    #[error("Microsoft Translator API密钥未配置")]
    MissingCredentials,
    #[error("无效的接口地址: {0}")]
    InvalidUrl(String),
}
