//! Turning raw form fields into a [`Recipe`].
//!
//! Hosts collect text from input widgets; this module does the parsing
//! every host would otherwise repeat. It performs no validation: run the
//! result through a [`crate::validate::Validator`] before accepting it.

use crate::model::{Ingredient, IngredientFactory, Recipe};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors produced while parsing raw form fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Preparation time must be a whole number of minutes, got {0:?}")]
    InvalidPreparationTime(String),
}

/// Unparsed recipe fields as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    /// Ingredient names separated by commas or newlines.
    pub ingredients: String,
    pub instructions: String,
    pub preparation_time: String,
}

impl RecipeDraft {
    /// Prefills a draft from an existing recipe, one ingredient per line.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        RecipeDraft {
            name: recipe.name().to_string(),
            category: recipe.category().unwrap_or_default().to_string(),
            ingredients: recipe
                .ingredients()
                .iter()
                .map(Ingredient::as_str)
                .collect::<Vec<_>>()
                .join("\n"),
            instructions: recipe.instructions().to_string(),
            preparation_time: recipe.preparation_time_minutes().to_string(),
        }
    }

    /// Parses the draft into a new recipe owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidPreparationTime`] when the preparation
    /// time is not a non-negative integer.
    pub fn into_recipe(
        self,
        factory: &mut IngredientFactory,
        owner: Option<&str>,
    ) -> Result<Recipe, DraftError> {
        let minutes = parse_minutes(&self.preparation_time)?;
        let ingredients: Vec<Ingredient> = split_ingredients(&self.ingredients)
            .into_iter()
            .map(|name| factory.ingredient(name))
            .collect();

        let mut recipe = Recipe::new(
            self.name.trim(),
            ingredients,
            self.instructions.trim(),
            minutes,
        );
        let category = self.category.trim();
        if !category.is_empty() {
            recipe.set_category(Some(category.to_string()));
        }
        recipe.set_owner(owner.map(str::to_string));
        Ok(recipe)
    }
}

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\r\n]+").expect("valid separator regex"));

/// Splits on commas and newlines, trims, and drops blank entries.
pub fn split_ingredients(text: &str) -> Vec<&str> {
    SEPARATOR_RE
        .split(text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

fn parse_minutes(text: &str) -> Result<u32, DraftError> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| DraftError::InvalidPreparationTime(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: " Carbonara ".to_string(),
            category: "Pasta".to_string(),
            ingredients: "Pasta, Eggs\n\nBacon\r\n".to_string(),
            instructions: "Boil pasta...\n".to_string(),
            preparation_time: " 20 ".to_string(),
        }
    }

    #[test]
    fn test_split_ingredients() {
        assert_eq!(
            split_ingredients("Flour, Sugar,,\nCocoa\n  \n"),
            vec!["Flour", "Sugar", "Cocoa"]
        );
        assert!(split_ingredients("").is_empty());
    }

    #[test]
    fn test_into_recipe() {
        let mut factory = IngredientFactory::new();
        let recipe = draft().into_recipe(&mut factory, Some("alice")).unwrap();

        assert_eq!(recipe.name(), "Carbonara");
        assert_eq!(recipe.category(), Some("Pasta"));
        assert_eq!(recipe.owner(), Some("alice"));
        assert_eq!(recipe.instructions(), "Boil pasta...");
        assert_eq!(recipe.preparation_time_minutes(), 20);
        let names: Vec<_> = recipe.ingredients().iter().map(|i| i.as_str()).collect();
        assert_eq!(names, vec!["Pasta", "Eggs", "Bacon"]);
        assert_eq!(factory.len(), 3);
    }

    #[test]
    fn test_invalid_preparation_time() {
        let mut factory = IngredientFactory::new();
        for raw in ["", "abc", "-5", "1.5"] {
            let mut bad = draft();
            bad.preparation_time = raw.to_string();
            assert_eq!(
                bad.into_recipe(&mut factory, None),
                Err(DraftError::InvalidPreparationTime(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_empty_category_means_none() {
        let mut factory = IngredientFactory::new();
        let mut plain = draft();
        plain.category = "  ".to_string();
        let recipe = plain.into_recipe(&mut factory, None).unwrap();
        assert_eq!(recipe.category(), None);
        assert_eq!(recipe.owner(), None);
    }

    #[test]
    fn test_from_recipe_prefills_fields() {
        let recipe = Recipe::new("Toast", ["Bread", "Butter"], "Toast it.", 3);
        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.ingredients, "Bread\nButter");
        assert_eq!(draft.preparation_time, "3");

        let mut factory = IngredientFactory::new();
        let copy = draft.into_recipe(&mut factory, None).unwrap();
        assert_eq!(copy.create_memento(), recipe.create_memento());
    }
}
