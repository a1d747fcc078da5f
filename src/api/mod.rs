pub mod handlers;

pub use handlers::{get_suggestions, health_check, AppState, SuggestionQuery};

use axum::{routing::get, Router};

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users/:user_id/suggestions", get(get_suggestions))
        .with_state(state)
}
