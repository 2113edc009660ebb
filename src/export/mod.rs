//! Read-only projections of a recipe.
//!
//! The engine never writes exports anywhere itself; callers store the
//! returned text wherever they like.

use crate::model::Recipe;

/// Message produced when the null recipe is exported.
pub const NOTHING_TO_EXPORT: &str = "No recipe to export";

/// A read-only operation over a recipe.
pub trait RecipeVisitor {
    type Output;

    fn visit(&mut self, recipe: &Recipe) -> Self::Output;
}

/// Renders a recipe as a plain-text block.
///
/// ```text
/// === Carbonara ===
///
/// INGREDIENTS:
/// - Pasta
///
/// INSTRUCTIONS:
/// Boil pasta...
///
/// Preparation time: 20 minutes
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl RecipeVisitor for TextExporter {
    type Output = String;

    fn visit(&mut self, recipe: &Recipe) -> String {
        if recipe.is_null() {
            return NOTHING_TO_EXPORT.to_string();
        }

        let ingredients = recipe
            .ingredients()
            .iter()
            .map(|ingredient| format!("- {ingredient}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "=== {} ===\n\nINGREDIENTS:\n{}\n\nINSTRUCTIONS:\n{}\n\nPreparation time: {} minutes\n",
            recipe.name(),
            ingredients,
            recipe.instructions(),
            recipe.preparation_time_minutes()
        )
    }
}
