pub mod pantry;
pub mod recipe;
pub mod suggestion;

pub use pantry::{PantryItem, StorageLocation};
pub use recipe::{Ingredient, IngredientRow, Recipe, RecipeRow};
pub use suggestion::Suggestion;
