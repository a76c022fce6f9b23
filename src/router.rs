use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, dictionary_handler, word_handler};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // 浏览器插件和本地前端都需要跨域访问
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        // 生词接口
        .route(
            "/api/words",
            post(word_handler::add_word).get(word_handler::list_words),
        )
        .route("/api/words/stats", get(word_handler::word_stats))
        .route("/api/words/:word", delete(word_handler::delete_word))
        .route("/api/words/:word/lookup", get(word_handler::lookup_word))
        .route("/api/words/:word/mastery", put(word_handler::update_mastery))
        // 词典配置与翻译
        .route(
            "/api/dictionary/config",
            get(dictionary_handler::get_config).post(dictionary_handler::update_config),
        )
        .route(
            "/api/dictionary/providers",
            get(dictionary_handler::list_providers),
        )
        .route("/api/translate", post(dictionary_handler::translate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
