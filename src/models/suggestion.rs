use super::{Ingredient, PantryItem, Recipe};
use serde::{Deserialize, Serialize};

/// 菜谱建议 (不落库，每次请求现算)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub recipe: Recipe,
    /// 按份量放大后仍缺少的配料及剩余数量
    pub missing_ingredients: Vec<Ingredient>,
    /// 消耗记录: 对应库存项，quantity 为实际用掉的数量
    pub pantry_items: Vec<PantryItem>,
}

impl Suggestion {
    pub fn missing_count(&self) -> usize {
        self.missing_ingredients.len()
    }
}
