use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An immutable, name-only ingredient leaf.
///
/// Cloning is cheap: the name lives behind an `Arc<str>`. Ingredients handed
/// out by an [`IngredientFactory`] share one allocation per distinct name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ingredient(Arc<str>);

impl Ingredient {
    /// Returns the ingredient name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if both handles point at the same interned name.
    pub fn ptr_eq(&self, other: &Ingredient) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ingredient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ingredient {
    fn from(name: &str) -> Self {
        Ingredient(Arc::from(name))
    }
}

impl From<String> for Ingredient {
    fn from(name: String) -> Self {
        Ingredient(Arc::from(name))
    }
}

/// Interning table for ingredients.
///
/// Guarantees at most one [`Ingredient`] allocation per distinct name for as
/// long as the factory lives. The table is append-only. It is owned by the
/// application root and passed to whatever builds recipes from raw data.
#[derive(Debug, Default)]
pub struct IngredientFactory {
    ingredients: HashMap<String, Ingredient>,
}

impl IngredientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned ingredient for `name`, creating it on first use.
    pub fn ingredient(&mut self, name: &str) -> Ingredient {
        if let Some(existing) = self.ingredients.get(name) {
            return existing.clone();
        }
        let ingredient = Ingredient::from(name);
        self.ingredients.insert(name.to_string(), ingredient.clone());
        ingredient
    }

    /// Number of distinct ingredient names interned so far.
    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Composite capability shared by ingredients, recipes and access proxies.
pub trait RecipeComponent {
    /// Human-readable description of the component.
    fn description(&self) -> String;

    /// Flattened ingredient leaves of the component.
    fn ingredients(&self) -> Vec<Ingredient>;
}

impl RecipeComponent for Ingredient {
    fn description(&self) -> String {
        self.0.to_string()
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        vec![self.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_interns_same_name() {
        let mut factory = IngredientFactory::new();
        let flour = factory.ingredient("Flour");
        let again = factory.ingredient("Flour");
        let sugar = factory.ingredient("Sugar");

        assert!(flour.ptr_eq(&again));
        assert!(!flour.ptr_eq(&sugar));
        assert_eq!(factory.len(), 2);
    }

    #[test]
    fn test_uninterned_ingredients_compare_by_name() {
        let a = Ingredient::from("Eggs");
        let b = Ingredient::from("Eggs".to_string());

        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_ingredient_is_its_own_leaf() {
        let cocoa = Ingredient::from("Cocoa");
        assert_eq!(cocoa.description(), "Cocoa");
        assert_eq!(cocoa.ingredients(), vec![cocoa.clone()]);
    }
}
