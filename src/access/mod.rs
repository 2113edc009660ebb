//! Ownership-gated read access to recipes.

use crate::model::{Ingredient, Recipe, RecipeComponent, RecipeId};

/// Marker returned instead of a description when access is refused.
pub const ACCESS_DENIED: &str = "Access denied";

/// User id that can read every recipe.
pub const ADMIN_USER: &str = "admin";

/// Proxy that exposes a recipe only to users allowed to see it.
///
/// Denied reads degrade to [`ACCESS_DENIED`] or an empty ingredient list;
/// the proxy never fails.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedRecipe<'a> {
    recipe: &'a Recipe,
    user: &'a str,
}

impl<'a> ProtectedRecipe<'a> {
    pub fn new(recipe: &'a Recipe, user: &'a str) -> Self {
        ProtectedRecipe { recipe, user }
    }

    /// Public recipes, the owner and the admin user are allowed.
    pub fn has_access(&self) -> bool {
        match self.recipe.owner() {
            None => true,
            Some(owner) => owner == self.user || self.user == ADMIN_USER,
        }
    }

    pub fn describe(&self) -> String {
        if self.has_access() {
            self.recipe.description()
        } else {
            ACCESS_DENIED.to_string()
        }
    }

    pub fn list_ingredients(&self) -> Vec<Ingredient> {
        if self.has_access() {
            RecipeComponent::ingredients(self.recipe)
        } else {
            Vec::new()
        }
    }

    /// Id of the wrapped recipe. Visible regardless of access.
    pub fn id(&self) -> RecipeId {
        self.recipe.id()
    }

    /// Name of the wrapped recipe. Visible regardless of access so denied
    /// recipes can still be listed.
    pub fn name(&self) -> &'a str {
        self.recipe.name()
    }

    pub fn owner(&self) -> Option<&'a str> {
        self.recipe.owner()
    }

    /// Returns the wrapped recipe when access is granted.
    pub fn recipe(&self) -> Option<&'a Recipe> {
        self.has_access().then_some(self.recipe)
    }

    pub fn user(&self) -> &str {
        self.user
    }
}

impl RecipeComponent for ProtectedRecipe<'_> {
    fn description(&self) -> String {
        self.describe()
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        self.list_ingredients()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn public_recipe() -> Recipe {
        Recipe::new("Caesar salad", ["Lettuce", "Chicken"], "", 15).with_category("Salad")
    }

    fn alice_recipe() -> Recipe {
        Recipe::new("Chocolate cake", ["Flour", "Cocoa"], "", 60)
            .with_category("Dessert")
            .with_owner("alice")
    }

    #[test]
    fn test_public_recipe_visible_to_anyone() {
        let recipe = public_recipe();
        for user in ["alice", "bob", ADMIN_USER, ""] {
            let proxy = ProtectedRecipe::new(&recipe, user);
            assert!(proxy.has_access());
            assert_eq!(proxy.describe(), recipe.description());
            assert_eq!(proxy.list_ingredients().len(), 2);
        }
    }

    #[test]
    fn test_owned_recipe_visible_to_owner_and_admin() {
        let recipe = alice_recipe();
        assert!(ProtectedRecipe::new(&recipe, "alice").has_access());
        assert!(ProtectedRecipe::new(&recipe, ADMIN_USER).has_access());
        assert_eq!(
            ProtectedRecipe::new(&recipe, "alice").describe(),
            "Chocolate cake (Dessert)\n- Flour\n- Cocoa\n"
        );
    }

    #[test]
    fn test_owned_recipe_denied_to_others() {
        let recipe = alice_recipe();
        let proxy = ProtectedRecipe::new(&recipe, "bob");
        assert!(!proxy.has_access());
        assert_eq!(proxy.describe(), ACCESS_DENIED);
        assert!(proxy.list_ingredients().is_empty());
        assert!(proxy.recipe().is_none());
        assert_eq!(proxy.description(), ACCESS_DENIED);
        assert_eq!(proxy.id(), recipe.id());
        assert_eq!(proxy.name(), "Chocolate cake");
        assert_eq!(proxy.owner(), Some("alice"));
    }
}
