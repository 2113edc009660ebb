//! Keyword search over recipes.
//!
//! Two independent paths live here:
//! - the [`Expression`] interpreter used by [`crate::book::RecipeBook::search`],
//! - a [`RecipeSearch`] decorator chain used by the catalog, where every
//!   stage narrows the result of the stage it wraps.

use crate::model::Recipe;

mod filter;

pub use filter::{AllRecipes, CategoryFilter, KeywordFilter, RecipeSearch};

/// A predicate evaluated against a single recipe.
pub trait Expression {
    fn interpret(&self, recipe: &Recipe) -> bool;
}

/// Case-insensitive substring match on the name or any ingredient.
///
/// An empty keyword matches every recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordExpression {
    keyword: String,
}

impl KeywordExpression {
    pub fn new(keyword: &str) -> Self {
        KeywordExpression {
            keyword: keyword.to_lowercase(),
        }
    }

    /// The lower-cased keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Matches against a name alone, ignoring ingredients.
    pub fn matches_name(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.keyword)
    }
}

impl Expression for KeywordExpression {
    fn interpret(&self, recipe: &Recipe) -> bool {
        self.matches_name(recipe.name())
            || recipe
                .ingredients()
                .iter()
                .any(|ingredient| ingredient.as_str().to_lowercase().contains(&self.keyword))
    }
}
