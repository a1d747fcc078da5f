use super::suggestions;
use crate::db::PantryStore;
use crate::error::AppError;
use crate::models::Suggestion;
use std::sync::Arc;

/// 菜谱建议服务
///
/// 每次请求重新读取菜谱、库存和家庭人数，不保存任何状态。
pub struct SuggestionService {
    store: Arc<dyn PantryStore>,
}

impl SuggestionService {
    pub fn new(store: Arc<dyn PantryStore>) -> Self {
        Self { store }
    }

    /// 生成用户的菜谱建议
    ///
    /// `servings_override` 存在时替代家庭人数。
    pub async fn suggestions_for_user(
        &self,
        user_id: i64,
        servings_override: Option<f64>,
    ) -> Result<Vec<Suggestion>, AppError> {
        let (recipes, pantry, household_size) = tokio::try_join!(
            self.store.get_recipes(user_id),
            self.store.get_pantry_items(user_id),
            self.store.get_household_size(user_id),
        )?;

        let num_to_serve = resolve_num_to_serve(user_id, household_size, servings_override)?;

        tracing::info!(
            "User {}: {} recipes, {} pantry items, serving {}",
            user_id,
            recipes.len(),
            pantry.len(),
            num_to_serve
        );

        // rayon 计算放到阻塞线程池，不占用 tokio 工作线程
        let suggestions = tokio::task::spawn_blocking(move || {
            suggestions::get_suggestions(&recipes, &pantry, num_to_serve)
        })
        .await
        .map_err(|e| AppError::Internal(format!("suggestion task failed: {}", e)))?;

        if let Some(best) = suggestions.first() {
            tracing::debug!(
                "User {}: best suggestion '{}' missing {} ingredients",
                user_id,
                best.recipe.name,
                best.missing_count()
            );
        }

        Ok(suggestions)
    }
}

/// 确定用餐人数
///
/// 查询参数 servings 优先（向上取整），否则使用家庭人数。
pub fn resolve_num_to_serve(
    user_id: i64,
    household_size: i64,
    servings_override: Option<f64>,
) -> Result<u32, AppError> {
    if let Some(servings) = servings_override {
        if !servings.is_finite() || servings <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "servings must be a positive number, got {}",
                servings
            )));
        }
        if servings > f64::from(u32::MAX) {
            return Err(AppError::InvalidInput(format!("servings {} is too large", servings)));
        }
        return Ok(servings.ceil() as u32);
    }

    if household_size < 1 {
        return Err(AppError::NotFound(format!("household for user {}", user_id)));
    }

    u32::try_from(household_size)
        .map_err(|_| AppError::InvalidInput(format!("household size {} is too large", household_size)))
}
