//! Field validation chain.
//!
//! A [`Validator`] checks one [`Rule`] and, only when that rule passes,
//! hands the recipe to its successor. The first failing link wins; later
//! links are never evaluated. Chains are stateless and can be reused.

use crate::model::Recipe;
use thiserror::Error;

/// Structural problems with user-supplied recipe data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Recipe name is required")]
    NameRequired,

    #[error("At least one ingredient is required")]
    IngredientsRequired,
}

/// A single field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Name must be non-empty after trimming.
    NameRequired,
    /// Ingredient list must be non-empty.
    IngredientsRequired,
}

impl Rule {
    fn check(self, recipe: &Recipe) -> Result<(), ValidationError> {
        match self {
            Rule::NameRequired if recipe.name().trim().is_empty() => {
                Err(ValidationError::NameRequired)
            }
            Rule::IngredientsRequired if recipe.ingredients().is_empty() => {
                Err(ValidationError::IngredientsRequired)
            }
            _ => Ok(()),
        }
    }
}

/// One link of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    rule: Rule,
    next: Option<Box<Validator>>,
}

impl Validator {
    /// Creates a single-link chain.
    pub fn new(rule: Rule) -> Self {
        Validator { rule, next: None }
    }

    /// Creates a link with an explicit successor.
    pub fn with_next(rule: Rule, next: Validator) -> Self {
        Validator {
            rule,
            next: Some(Box::new(next)),
        }
    }

    /// Appends `rule` at the end of the chain.
    pub fn then(mut self, rule: Rule) -> Self {
        let tail = match self.next.take() {
            Some(next) => (*next).then(rule),
            None => Validator::new(rule),
        };
        self.next = Some(Box::new(tail));
        self
    }

    /// The reference composition: name first, then ingredients.
    pub fn standard() -> Self {
        Validator::new(Rule::NameRequired).then(Rule::IngredientsRequired)
    }

    pub fn validate(&self, recipe: &Recipe) -> Result<(), ValidationError> {
        self.rule.check(recipe)?;
        match &self.next {
            Some(next) => next.validate(recipe),
            None => Ok(()),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator::standard()
    }
}
