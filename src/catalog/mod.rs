//! Repository-backed recipe catalog.
//!
//! # Responsibility
//! - Keep recipes behind a storage-agnostic [`RecipeRepository`].
//! - Gate reads through [`ProtectedRecipe`] for the requesting user.
//!
//! # Invariants
//! - Lookups never fail: a missing id yields the null recipe wrapped in a
//!   proxy.
//! - The catalog is independent from [`crate::book::RecipeBook`]; it has no
//!   ordering, observers or undo.

use crate::access::ProtectedRecipe;
use crate::model::{IngredientFactory, Recipe, RecipeId};
use crate::search::RecipeSearch;
use crate::source::{RecipeSource, SourceError};
use log::{debug, info};

/// Storage boundary for catalog recipes.
pub trait RecipeRepository {
    /// Stores `recipe`, replacing any recipe with the same id.
    fn save_recipe(&mut self, recipe: Recipe);
    fn get_recipe(&self, id: RecipeId) -> Option<&Recipe>;
    fn delete_recipe(&mut self, id: RecipeId) -> Option<Recipe>;
    /// Every stored recipe in insertion order.
    fn all_recipes(&self) -> Vec<&Recipe>;
}

/// Vector-backed repository that preserves insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Vec<Recipe>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    fn position(&self, id: RecipeId) -> Option<usize> {
        self.recipes.iter().position(|recipe| recipe.id() == id)
    }
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn save_recipe(&mut self, recipe: Recipe) {
        match self.position(recipe.id()) {
            Some(index) => self.recipes[index] = recipe,
            None => self.recipes.push(recipe),
        }
    }

    fn get_recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.id() == id)
    }

    fn delete_recipe(&mut self, id: RecipeId) -> Option<Recipe> {
        let index = self.position(id)?;
        Some(self.recipes.remove(index))
    }

    fn all_recipes(&self) -> Vec<&Recipe> {
        self.recipes.iter().collect()
    }
}

/// Use-case facade over a [`RecipeRepository`].
pub struct RecipeCatalog<R: RecipeRepository> {
    repo: R,
}

impl<R: RecipeRepository> RecipeCatalog<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores `recipe` and returns its id. The null recipe is ignored.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Option<RecipeId> {
        if recipe.is_null() {
            return None;
        }
        let id = recipe.id();
        debug!("event=catalog_recipe_saved module=catalog id={}", id);
        self.repo.save_recipe(recipe);
        Some(id)
    }

    /// Returns the recipe with `id` as seen by `user`.
    pub fn get_recipe<'a>(&'a self, id: RecipeId, user: &'a str) -> ProtectedRecipe<'a> {
        let recipe = self.repo.get_recipe(id).unwrap_or_else(|| Recipe::null());
        ProtectedRecipe::new(recipe, user)
    }

    /// Returns `true` if a recipe was deleted.
    pub fn delete_recipe(&mut self, id: RecipeId) -> bool {
        let deleted = self.repo.delete_recipe(id).is_some();
        debug!(
            "event=catalog_recipe_deleted module=catalog id={} deleted={}",
            id, deleted
        );
        deleted
    }

    /// Runs `search` over every stored recipe.
    pub fn search_recipes(&self, search: &dyn RecipeSearch) -> Vec<&Recipe> {
        search.search(self.repo.all_recipes())
    }

    pub fn all_recipes(&self) -> Vec<&Recipe> {
        self.repo.all_recipes()
    }

    /// Saves every recipe produced by `source`. Returns how many were saved.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`SourceError`]; nothing is saved in that case.
    pub fn import(
        &mut self,
        source: &dyn RecipeSource,
        factory: &mut IngredientFactory,
    ) -> Result<usize, SourceError> {
        let recipes = source.recipes(factory)?;
        let count = recipes.len();
        for recipe in recipes {
            self.repo.save_recipe(recipe);
        }
        info!("event=catalog_imported module=catalog count={}", count);
        Ok(count)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
