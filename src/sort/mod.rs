//! Pluggable orderings over recipes.

use crate::model::Recipe;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Total orderings a [`crate::book::RecipeBook`] can keep its recipes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Case-insensitive lexicographic order on the name.
    #[default]
    ByName,
    /// Ascending preparation time, ties broken by case-insensitive name.
    ByPreparationTime,
}

impl SortStrategy {
    /// Returns a sorted copy of `recipes`. The input is left untouched.
    pub fn sort(&self, recipes: &[Recipe]) -> Vec<Recipe> {
        let mut sorted = recipes.to_vec();
        self.sort_in_place(&mut sorted);
        sorted
    }

    pub(crate) fn sort_in_place(&self, recipes: &mut [Recipe]) {
        recipes.sort_by(|a, b| self.compare(a, b));
    }

    /// Compares two recipes under this strategy.
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortStrategy::ByName => compare_names(a, b),
            SortStrategy::ByPreparationTime => a
                .preparation_time_minutes()
                .cmp(&b.preparation_time_minutes())
                .then_with(|| compare_names(a, b)),
        }
    }

    /// Stable label for logs and hosts.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::ByName => "by_name",
            SortStrategy::ByPreparationTime => "by_preparation_time",
        }
    }
}

fn compare_names(a: &Recipe, b: &Recipe) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}
