use crate::models::{Ingredient, IngredientRow, PantryItem, Recipe, RecipeRow};
use sqlx::PgPool;
use std::collections::HashMap;

// 原表列均可为空，空值在查询中给出默认值，避免整次请求解码失败
const RECIPES_SQL: &str = r#"
    SELECT id::int8 AS id,
           user_id::int8 AS user_id,
           COALESCE(name, '') AS name,
           procedure,
           COALESCE(servings, 1.0)::float8 AS servings
    FROM recipes
    WHERE user_id = $1
    ORDER BY id
"#;

const INGREDIENTS_SQL: &str = r#"
    SELECT recipe_id::int8 AS recipe_id,
           COALESCE(name, '') AS name,
           COALESCE(quantity, 0.0)::float8 AS quantity,
           COALESCE(unit, '') AS unit
    FROM ingredients
    WHERE recipe_id = ANY($1)
    ORDER BY id
"#;

const PANTRY_ITEMS_SQL: &str = r#"
    SELECT id::int8 AS id,
           user_id::int8 AS user_id,
           COALESCE(name, '') AS name,
           COALESCE(quantity, 0.0)::float8 AS quantity,
           COALESCE(unit, '') AS unit,
           COALESCE(storage_location, 'PANTRY') AS storage_location,
           COALESCE(date_added, LOCALTIMESTAMP) AS date_added,
           COALESCE(use_by, LOCALTIMESTAMP) AS use_by
    FROM pantry_items
    WHERE user_id = $1
    ORDER BY id
"#;

/// 查询用户的全部菜谱（含配料）
pub async fn list_recipes(pool: &PgPool, user_id: i64) -> Result<Vec<Recipe>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RecipeRow>(RECIPES_SQL)
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let recipe_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let ingredients = list_ingredients(pool, &recipe_ids).await?;

    Ok(attach_ingredients(rows, ingredients))
}

/// 批量查询多个菜谱的配料 (按 id 升序，保持录入顺序)
pub async fn list_ingredients(
    pool: &PgPool,
    recipe_ids: &[i64],
) -> Result<Vec<IngredientRow>, sqlx::Error> {
    sqlx::query_as::<_, IngredientRow>(INGREDIENTS_SQL)
        .bind(recipe_ids)
        .fetch_all(pool)
        .await
}

/// 查询用户的库存
pub async fn list_pantry_items(pool: &PgPool, user_id: i64) -> Result<Vec<PantryItem>, sqlx::Error> {
    sqlx::query_as::<_, PantryItem>(PANTRY_ITEMS_SQL)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// 统计同一户主下的成员数（含户主本人）
///
/// 用户没有成员记录时返回 0。
pub async fn count_household(pool: &PgPool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT count(*)
        FROM household_members hm
        WHERE hm.head_of_household_id = (
            SELECT head_of_household_id
            FROM household_members
            WHERE user_id = $1
            ORDER BY id
            LIMIT 1
        )
        "#
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// 把配料行挂到对应菜谱上，菜谱顺序不变
pub fn attach_ingredients(rows: Vec<RecipeRow>, ingredients: Vec<IngredientRow>) -> Vec<Recipe> {
    let mut by_recipe: HashMap<i64, Vec<Ingredient>> = HashMap::new();
    for row in ingredients {
        by_recipe.entry(row.recipe_id).or_default().push(row.into());
    }

    rows.into_iter()
        .map(|r| {
            let ingredients = by_recipe.remove(&r.id).unwrap_or_default();
            r.into_recipe(ingredients)
        })
        .collect()
}
