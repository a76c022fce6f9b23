pub mod dictionary_handler;
pub mod word_handler;

use axum::Json;
use serde_json::{json, Value};

/// 服务说明，浏览器插件用来检测后端是否可达
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "生词记录系统 API 服务" }))
}
