use super::ingredient::{Ingredient, RecipeComponent};
use crate::export::RecipeVisitor;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Stable identifier assigned to every recipe at construction.
pub type RecipeId = Uuid;

/// Name carried by the "no recipe" sentinel.
pub const NULL_RECIPE_NAME: &str = "Recipe not found";

static NULL_RECIPE: OnceLock<Recipe> = OnceLock::new();

/// A named dish record.
///
/// The entity tolerates invalid state (empty name, no ingredients) so that a
/// host can stage edits; validity is checked by [`crate::validate::Validator`]
/// at the boundary where a recipe is accepted.
///
/// A clone keeps the [`RecipeId`], so it denotes the same recipe for every
/// identity-based operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    /// Catalog grouping, `None` when uncategorised.
    category: Option<String>,
    /// Owning user, `None` means public.
    owner: Option<String>,
    ingredients: Vec<Ingredient>,
    instructions: String,
    preparation_time_minutes: u32,
}

impl Recipe {
    /// Creates a recipe with a freshly generated id.
    pub fn new<I>(
        name: impl Into<String>,
        ingredients: I,
        instructions: impl Into<String>,
        preparation_time_minutes: u32,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Ingredient>,
    {
        Recipe {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            owner: None,
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            instructions: instructions.into(),
            preparation_time_minutes,
        }
    }

    /// Returns the shared "no recipe" sentinel.
    ///
    /// Used wherever a lookup misses or nothing is selected, so callers can
    /// keep working with a `&Recipe` and test [`Recipe::is_null`] instead of
    /// branching on an absent value.
    pub fn null() -> &'static Recipe {
        NULL_RECIPE.get_or_init(|| Recipe {
            id: Uuid::nil(),
            name: NULL_RECIPE_NAME.to_string(),
            category: None,
            owner: None,
            ingredients: Vec::new(),
            instructions: String::new(),
            preparation_time_minutes: 0,
        })
    }

    /// Sets the catalog category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the owning user.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn is_null(&self) -> bool {
        self.id.is_nil()
    }

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn preparation_time_minutes(&self) -> u32 {
        self.preparation_time_minutes
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    pub fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub fn set_ingredients<I>(&mut self, ingredients: I)
    where
        I: IntoIterator,
        I::Item: Into<Ingredient>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn set_preparation_time_minutes(&mut self, minutes: u32) {
        self.preparation_time_minutes = minutes;
    }

    /// Snapshots the four editable fields.
    pub fn create_memento(&self) -> RecipeMemento {
        RecipeMemento {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
            preparation_time_minutes: self.preparation_time_minutes,
        }
    }

    /// Overwrites all four editable fields from `memento`.
    ///
    /// Identity, category and owner are left alone. The sentinel is immutable,
    /// so restoring into a null recipe does nothing.
    pub fn restore(&mut self, memento: RecipeMemento) {
        if self.is_null() {
            return;
        }
        self.name = memento.name;
        self.ingredients = memento.ingredients;
        self.instructions = memento.instructions;
        self.preparation_time_minutes = memento.preparation_time_minutes;
    }

    /// Double-dispatch entry point for visitors.
    pub fn accept<V: RecipeVisitor>(&self, visitor: &mut V) -> V::Output {
        visitor.visit(self)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl RecipeComponent for Recipe {
    fn description(&self) -> String {
        let mut description = match &self.category {
            Some(category) => format!("{} ({})\n", self.name, category),
            None => format!("{}\n", self.name),
        };
        for ingredient in &self.ingredients {
            description.push_str("- ");
            description.push_str(ingredient.as_str());
            description.push('\n');
        }
        description
    }

    fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.clone()
    }
}

/// Immutable value copy of a recipe's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeMemento {
    name: String,
    ingredients: Vec<Ingredient>,
    instructions: String,
    preparation_time_minutes: u32,
}

impl RecipeMemento {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn preparation_time_minutes(&self) -> u32 {
        self.preparation_time_minutes
    }
}
