use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 菜谱配料 (Ingredient)
///
/// 匹配时只比较 `name`（忽略大小写），`unit` 不参与换算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// 菜谱 (Recipe)
///
/// `servings` 为菜谱原始份量（可供几人食用）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub procedure: Option<String>,
    pub servings: f64,
    pub ingredients: Vec<Ingredient>,
}

/// recipes 表行，不含配料
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub procedure: Option<String>,
    pub servings: f64,
}

/// ingredients 表行
#[derive(Debug, Clone, FromRow)]
pub struct IngredientRow {
    pub recipe_id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl RecipeRow {
    pub fn into_recipe(self, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            procedure: self.procedure,
            servings: self.servings,
            ingredients,
        }
    }
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
        }
    }
}
