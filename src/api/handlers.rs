use crate::auth::{AuthUser, TokenVerifier};
use crate::error::AppError;
use crate::service::SuggestionService;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRef, Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub suggestions: Arc<SuggestionService>,
    pub verifier: Arc<TokenVerifier>,
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// 查询参数: 可选的用餐人数，替代家庭人数
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    pub servings: Option<f64>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 菜谱建议接口
pub async fn get_suggestions(
    State(state): State<AppState>,
    user: AuthUser,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<SuggestionQuery>, QueryRejection>,
) -> Response {
    // 参数错误也返回统一的 JSON 错误体
    let (user_id, query) = match (path, query) {
        (Ok(Path(user_id)), Ok(Query(query))) => (user_id, query),
        (Err(e), _) => return AppError::InvalidInput(e.body_text()).into_response(),
        (_, Err(e)) => return AppError::InvalidInput(e.body_text()).into_response(),
    };

    if user.user_id() != user_id {
        tracing::warn!(
            "User {} requested suggestions for user {}",
            user.user_id(),
            user_id
        );
        return AppError::Forbidden(format!("cannot read suggestions of user {}", user_id))
            .into_response();
    }

    match state
        .suggestions
        .suggestions_for_user(user_id, query.servings)
        .await
    {
        Ok(suggestions) => (StatusCode::OK, Json(suggestions)).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!("Suggestions for user {} failed: {}", user_id, e);
            } else {
                tracing::warn!("Suggestions for user {} rejected: {}", user_id, e);
            }
            e.into_response()
        }
    }
}
