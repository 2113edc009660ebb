//! Recipe entity model.
//!
//! Holds the [`Recipe`] entity with its null-object sentinel and memento,
//! plus the interned [`Ingredient`] leaves recipes are composed of.

mod ingredient;
mod recipe;

pub use ingredient::{Ingredient, IngredientFactory, RecipeComponent};
pub use recipe::{Recipe, RecipeId, RecipeMemento, NULL_RECIPE_NAME};
