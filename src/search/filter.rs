use super::{Expression, KeywordExpression};
use crate::model::Recipe;

/// A search stage over a list of recipes.
///
/// Decorating stages only ever narrow the result of the stage they wrap.
pub trait RecipeSearch {
    fn search<'a>(&self, recipes: Vec<&'a Recipe>) -> Vec<&'a Recipe>;
}

/// Identity stage: returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRecipes;

impl RecipeSearch for AllRecipes {
    fn search<'a>(&self, recipes: Vec<&'a Recipe>) -> Vec<&'a Recipe> {
        recipes
    }
}

/// Keeps recipes whose category equals `category` exactly.
pub struct CategoryFilter {
    wrapped: Box<dyn RecipeSearch>,
    category: String,
}

impl CategoryFilter {
    pub fn new(wrapped: impl RecipeSearch + 'static, category: impl Into<String>) -> Self {
        CategoryFilter {
            wrapped: Box::new(wrapped),
            category: category.into(),
        }
    }
}

impl RecipeSearch for CategoryFilter {
    fn search<'a>(&self, recipes: Vec<&'a Recipe>) -> Vec<&'a Recipe> {
        self.wrapped
            .search(recipes)
            .into_iter()
            .filter(|recipe| recipe.category() == Some(self.category.as_str()))
            .collect()
    }
}

/// Keeps recipes matched by a [`KeywordExpression`].
pub struct KeywordFilter {
    wrapped: Box<dyn RecipeSearch>,
    expression: KeywordExpression,
}

impl KeywordFilter {
    pub fn new(wrapped: impl RecipeSearch + 'static, keyword: &str) -> Self {
        KeywordFilter {
            wrapped: Box::new(wrapped),
            expression: KeywordExpression::new(keyword),
        }
    }
}

impl RecipeSearch for KeywordFilter {
    fn search<'a>(&self, recipes: Vec<&'a Recipe>) -> Vec<&'a Recipe> {
        self.wrapped
            .search(recipes)
            .into_iter()
            .filter(|recipe| self.expression.interpret(recipe))
            .collect()
    }
}
