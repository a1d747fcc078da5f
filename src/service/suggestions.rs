use crate::models::{Ingredient, PantryItem, Recipe, Suggestion};
use rayon::prelude::*;

/// 库存匹配结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PantryMatch {
    /// 仍缺少的配料（剩余数量）
    pub missing: Vec<Ingredient>,
    /// 消耗记录
    pub consumed: Vec<PantryItem>,
}

/// 计算放大系数
///
/// 只放大不缩小: 菜谱份量少于用餐人数时按比例放大，否则为 1.0。
/// 份量 <= 0 或非有限值视为无效，按 1.0 处理。
pub fn scale_factor(servings: f64, num_to_serve: u32) -> f64 {
    let num_to_serve = f64::from(num_to_serve.max(1));

    if !servings.is_finite() || servings <= 0.0 {
        tracing::warn!("Invalid recipe servings {}, using factor 1.0", servings);
        return 1.0;
    }

    if servings < num_to_serve {
        num_to_serve / servings
    } else {
        1.0
    }
}

/// 复制配料列表并按系数放大，不修改原菜谱
pub fn scale_ingredients(ingredients: &[Ingredient], factor: f64) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|i| Ingredient {
            quantity: i.quantity * factor,
            ..i.clone()
        })
        .collect()
}

/// 贪心匹配库存
///
/// 按库存顺序遍历，每个库存项只认领名称（忽略大小写）相同的第一个配料:
/// - 库存足够: 移除该配料，记录实际用量
/// - 库存不足: 扣减配料剩余数量，记录整项库存
///
/// 数量 <= 0 或非有限值的库存项不参与匹配，保证剩余数量不会变大。
pub fn match_pantry(needed: Vec<Ingredient>, pantry: &[PantryItem]) -> PantryMatch {
    let mut missing = needed;
    let mut consumed = Vec::new();

    for item in pantry {
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            tracing::warn!(
                "Skipping pantry item {} '{}' with quantity {}",
                item.id,
                item.name,
                item.quantity
            );
            continue;
        }

        let item_name = item.name.to_lowercase();
        let Some(pos) = missing
            .iter()
            .position(|i| i.name.to_lowercase() == item_name)
        else {
            continue;
        };

        if item.quantity >= missing[pos].quantity {
            let covered = missing.remove(pos);
            consumed.push(item.with_quantity(covered.quantity));
        } else {
            missing[pos].quantity -= item.quantity;
            consumed.push(item.clone());
        }
    }

    PantryMatch { missing, consumed }
}

/// 单个菜谱的建议，库存始终从完整列表开始匹配
pub fn suggest_recipe(recipe: &Recipe, pantry: &[PantryItem], num_to_serve: u32) -> Suggestion {
    let factor = scale_factor(recipe.servings, num_to_serve);
    let needed = scale_ingredients(&recipe.ingredients, factor);
    let PantryMatch { missing, consumed } = match_pantry(needed, pantry);

    Suggestion {
        recipe: recipe.clone(),
        missing_ingredients: missing,
        pantry_items: consumed,
    }
}

/// 按缺少配料数升序排序（稳定排序，同数量保持原顺序）
pub fn rank(suggestions: &mut [Suggestion]) {
    suggestions.sort_by_key(Suggestion::missing_count);
}

/// 生成并排序全部菜谱建议
pub fn get_suggestions(
    recipes: &[Recipe],
    pantry: &[PantryItem],
    num_to_serve: u32,
) -> Vec<Suggestion> {
    // par_iter + collect 保持输入顺序，rank 的稳定性依赖于此
    let mut suggestions: Vec<Suggestion> = recipes
        .par_iter()
        .map(|recipe| suggest_recipe(recipe, pantry, num_to_serve))
        .collect();

    rank(&mut suggestions);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorageLocation;
    use chrono::NaiveDate;

    fn recipe(id: i64, servings: f64, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id,
            user_id: 1,
            name: format!("recipe-{}", id),
            procedure: None,
            servings,
            ingredients,
        }
    }

    fn pantry_item(id: i64, name: &str, quantity: f64, unit: &str) -> PantryItem {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        PantryItem {
            id,
            user_id: 1,
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            storage_location: StorageLocation::Fridge,
            date_added: day,
            use_by: day,
        }
    }

    fn cereal() -> Recipe {
        Recipe {
            name: "cereal".to_string(),
            procedure: Some("pour the milk".to_string()),
            ..recipe(
                1,
                4.0,
                vec![
                    Ingredient::new("milk", 1.0, "liter"),
                    Ingredient::new("froot loops", 2.0, "cups"),
                ],
            )
        }
    }

    #[test]
    fn factor_never_scales_down() {
        assert_eq!(scale_factor(4.0, 2), 1.0);
        assert_eq!(scale_factor(4.0, 4), 1.0);
        assert_eq!(scale_factor(4.0, 8), 2.0);
        assert_eq!(scale_factor(2.0, 3), 1.5);
    }

    #[test]
    fn invalid_servings_fall_back_to_unscaled() {
        assert_eq!(scale_factor(0.0, 5), 1.0);
        assert_eq!(scale_factor(-2.0, 5), 1.0);
        assert_eq!(scale_factor(f64::NAN, 5), 1.0);
    }

    #[test]
    fn zero_household_is_treated_as_one() {
        assert_eq!(scale_factor(0.5, 0), 2.0);
        assert_eq!(scale_factor(1.0, 0), 1.0);
    }

    #[test]
    fn scaling_copies_without_touching_recipe() {
        let r = cereal();
        let scaled = scale_ingredients(&r.ingredients, 3.0);

        assert_eq!(scaled[0].quantity, 3.0);
        assert_eq!(scaled[1].quantity, 6.0);
        assert_eq!(r.ingredients[0].quantity, 1.0);
        assert_eq!(r.ingredients[1].quantity, 2.0);
    }

    #[test]
    fn cereal_for_two_is_missing_froot_loops() {
        let pantry = vec![pantry_item(10, "milk", 1.0, "liter")];

        let out = get_suggestions(&[cereal()], &pantry, 2);

        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].missing_ingredients,
            vec![Ingredient::new("froot loops", 2.0, "cups")]
        );
        assert_eq!(out[0].pantry_items, vec![pantry_item(10, "milk", 1.0, "liter")]);
    }

    #[test]
    fn cereal_for_eight_partially_covers_milk() {
        let pantry = vec![pantry_item(10, "milk", 1.0, "liter")];

        let out = get_suggestions(&[cereal()], &pantry, 8);

        assert_eq!(
            out[0].missing_ingredients,
            vec![
                Ingredient::new("milk", 1.0, "liter"),
                Ingredient::new("froot loops", 4.0, "cups"),
            ]
        );
        // 库存不足时记录整项库存
        assert_eq!(out[0].pantry_items, pantry);
    }

    #[test]
    fn full_cover_records_only_the_needed_amount() {
        let r = recipe(1, 2.0, vec![Ingredient::new("flour", 300.0, "g")]);
        let pantry = vec![pantry_item(5, "flour", 1000.0, "g")];

        let out = suggest_recipe(&r, &pantry, 2);

        assert!(out.missing_ingredients.is_empty());
        assert_eq!(out.pantry_items.len(), 1);
        assert_eq!(out.pantry_items[0].quantity, 300.0);
        assert_eq!(out.pantry_items[0].id, 5);
        assert_eq!(pantry[0].quantity, 1000.0);
    }

    #[test]
    fn every_ingredient_covered_means_nothing_missing() {
        let r = recipe(
            1,
            1.0,
            vec![
                Ingredient::new("eggs", 2.0, "pcs"),
                Ingredient::new("butter", 10.0, "g"),
            ],
        );
        let pantry = vec![
            pantry_item(1, "butter", 250.0, "g"),
            pantry_item(2, "eggs", 12.0, "pcs"),
        ];

        let out = suggest_recipe(&r, &pantry, 3);

        assert!(out.missing_ingredients.is_empty());
        assert_eq!(out.pantry_items[0].quantity, 30.0);
        assert_eq!(out.pantry_items[1].quantity, 6.0);
    }

    #[test]
    fn several_pantry_items_add_up() {
        let r = recipe(1, 1.0, vec![Ingredient::new("rice", 500.0, "g")]);
        let pantry = vec![
            pantry_item(1, "rice", 200.0, "g"),
            pantry_item(2, "Rice", 200.0, "g"),
            pantry_item(3, "RICE", 200.0, "g"),
        ];

        let out = suggest_recipe(&r, &pantry, 1);

        assert!(out.missing_ingredients.is_empty());
        let used: Vec<f64> = out.pantry_items.iter().map(|p| p.quantity).collect();
        assert_eq!(used, vec![200.0, 200.0, 100.0]);
    }

    #[test]
    fn unusable_pantry_quantities_are_skipped() {
        let r = recipe(1, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let pantry = vec![
            pantry_item(1, "milk", -3.0, "liter"),
            pantry_item(2, "milk", f64::NAN, "liter"),
            pantry_item(3, "milk", 0.0, "liter"),
        ];

        let out = suggest_recipe(&r, &pantry, 1);

        assert_eq!(out.missing_ingredients, vec![Ingredient::new("milk", 1.0, "liter")]);
        assert!(out.pantry_items.is_empty());
    }

    #[test]
    fn skipped_pantry_item_does_not_claim_the_ingredient() {
        let r = recipe(1, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let pantry = vec![
            pantry_item(1, "milk", -3.0, "liter"),
            pantry_item(2, "milk", 0.25, "liter"),
        ];

        let out = suggest_recipe(&r, &pantry, 1);

        assert_eq!(out.missing_ingredients, vec![Ingredient::new("milk", 0.75, "liter")]);
        assert_eq!(out.pantry_items.len(), 1);
        assert_eq!(out.pantry_items[0].id, 2);
        assert!(out.missing_ingredients.iter().all(|i| i.quantity >= 0.0));
    }

    #[test]
    fn name_match_ignores_case() {
        let r = recipe(1, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let pantry = vec![pantry_item(1, "Milk", 2.0, "liter")];

        let out = suggest_recipe(&r, &pantry, 1);

        assert!(out.missing_ingredients.is_empty());
        assert_eq!(out.pantry_items[0].name, "Milk");
    }

    #[test]
    fn name_match_does_not_trim() {
        let r = recipe(1, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let pantry = vec![pantry_item(1, " milk", 2.0, "liter")];

        let out = suggest_recipe(&r, &pantry, 1);

        assert_eq!(out.missing_ingredients.len(), 1);
        assert!(out.pantry_items.is_empty());
    }

    #[test]
    fn pantry_item_claims_only_first_same_named_ingredient() {
        let r = recipe(
            1,
            1.0,
            vec![
                Ingredient::new("sugar", 50.0, "g"),
                Ingredient::new("sugar", 20.0, "g"),
            ],
        );
        let pantry = vec![pantry_item(1, "sugar", 1000.0, "g")];

        let out = suggest_recipe(&r, &pantry, 1);

        assert_eq!(out.missing_ingredients, vec![Ingredient::new("sugar", 20.0, "g")]);
        assert_eq!(out.pantry_items.len(), 1);
        assert_eq!(out.pantry_items[0].quantity, 50.0);
    }

    #[test]
    fn second_pantry_item_reaches_second_same_named_ingredient() {
        let r = recipe(
            1,
            1.0,
            vec![
                Ingredient::new("sugar", 50.0, "g"),
                Ingredient::new("sugar", 20.0, "g"),
            ],
        );
        let pantry = vec![
            pantry_item(1, "sugar", 1000.0, "g"),
            pantry_item(2, "sugar", 1000.0, "g"),
        ];

        let out = suggest_recipe(&r, &pantry, 1);

        assert!(out.missing_ingredients.is_empty());
        assert_eq!(out.pantry_items[1].quantity, 20.0);
    }

    #[test]
    fn pantry_is_not_shared_between_recipes() {
        let a = recipe(1, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let b = recipe(2, 1.0, vec![Ingredient::new("milk", 1.0, "liter")]);
        let pantry = vec![pantry_item(1, "milk", 1.0, "liter")];

        let out = get_suggestions(&[a, b], &pantry, 1);

        assert!(out.iter().all(|s| s.missing_ingredients.is_empty()));
        assert!(out.iter().all(|s| s.pantry_items.len() == 1));
    }

    #[test]
    fn fewest_missing_ranks_first() {
        let a = recipe(
            1,
            1.0,
            vec![
                Ingredient::new("a", 1.0, "x"),
                Ingredient::new("b", 1.0, "x"),
                Ingredient::new("c", 1.0, "x"),
            ],
        );
        let b = recipe(2, 1.0, vec![Ingredient::new("d", 1.0, "x")]);
        let pantry = vec![pantry_item(1, "d", 1.0, "x")];

        let out = get_suggestions(&[a, b], &pantry, 1);

        let ids: Vec<i64> = out.iter().map(|s| s.recipe.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(out[1].missing_count(), 3);
    }

    #[test]
    fn empty_recipe_ranks_before_anything_missing() {
        let full = recipe(1, 1.0, vec![Ingredient::new("salt", 1.0, "g")]);
        let empty = recipe(2, 1.0, vec![]);

        let out = get_suggestions(&[full, empty], &[], 4);

        assert_eq!(out[0].recipe.id, 2);
        assert!(out[0].missing_ingredients.is_empty());
        assert!(out[0].pantry_items.is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let recipes: Vec<Recipe> = (1..=20)
            .map(|id| {
                let n = if id % 2 == 0 { 1 } else { 2 };
                let ingredients = (0..n)
                    .map(|k| Ingredient::new(format!("item-{}", k), 1.0, "x"))
                    .collect();
                recipe(id, 1.0, ingredients)
            })
            .collect();

        let out = get_suggestions(&recipes, &[], 1);

        let ids: Vec<i64> = out.iter().map(|s| s.recipe.id).collect();
        let mut expected: Vec<i64> = (1..=20).filter(|id| id % 2 == 0).collect();
        expected.extend((1..=20).filter(|id| id % 2 == 1));
        assert_eq!(ids, expected);
    }

    #[test]
    fn repeated_calls_give_identical_output() {
        let recipes = vec![cereal(), recipe(2, 2.0, vec![Ingredient::new("milk", 3.0, "liter")])];
        let pantry = vec![
            pantry_item(1, "milk", 1.5, "liter"),
            pantry_item(2, "froot loops", 10.0, "cups"),
        ];

        let first = get_suggestions(&recipes, &pantry, 6);
        let second = get_suggestions(&recipes, &pantry, 6);

        assert_eq!(first, second);
    }

    #[test]
    fn suggestion_keeps_original_recipe() {
        let out = get_suggestions(&[cereal()], &[], 8);

        assert_eq!(out[0].recipe, cereal());
        assert_eq!(out[0].missing_ingredients[0].quantity, 2.0);
    }
}
