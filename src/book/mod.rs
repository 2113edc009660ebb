//! The authoritative, ordered recipe collection.
//!
//! [`RecipeBook`] owns the recipes, the active [`SortStrategy`] and the
//! observer list. Every operation is total: missing recipes turn an
//! operation into a no-op instead of an error, and lookups that miss return
//! the null recipe.
//!
//! Outside of initial loading, hosts are expected to mutate the book through
//! [`crate::command`] so that changes can be undone.

use crate::model::{Recipe, RecipeId};
use crate::search::{Expression, KeywordExpression};
use crate::sort::SortStrategy;
use log::debug;

mod observer;

pub use observer::{CollectionObserver, ObserverId};
use observer::Observers;

#[derive(Default)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
    strategy: SortStrategy,
    observers: Observers,
    revision: u64,
}

impl RecipeBook {
    /// Creates an empty book sorted by name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty book using `strategy`.
    pub fn with_strategy(strategy: SortStrategy) -> Self {
        RecipeBook {
            strategy,
            ..Self::default()
        }
    }

    /// Bulk initialisation path: appends every non-null recipe, sorts once and
    /// notifies once. Returns the number of recipes added.
    pub fn load(&mut self, recipes: impl IntoIterator<Item = Recipe>) -> usize {
        let before = self.recipes.len();
        self.recipes.extend(recipes.into_iter().filter(|recipe| !recipe.is_null()));
        let added = self.recipes.len() - before;
        self.resort();
        debug!(
            "event=recipes_loaded module=book added={} count={}",
            added,
            self.recipes.len()
        );
        self.notify();
        added
    }

    /// Appends `recipe`, re-sorts and notifies.
    ///
    /// The null recipe is never stored; adding it is a no-op.
    pub fn add(&mut self, recipe: Recipe) -> bool {
        if recipe.is_null() {
            debug!("event=recipe_add_ignored module=book reason=null_recipe");
            return false;
        }
        debug!(
            "event=recipe_added module=book id={} count={}",
            recipe.id(),
            self.recipes.len() + 1
        );
        self.recipes.push(recipe);
        self.resort();
        self.notify();
        true
    }

    /// Removes the recipe with `id` if present and notifies.
    ///
    /// Removal keeps the relative order of the remaining recipes.
    pub fn remove(&mut self, id: RecipeId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.recipes.remove(index);
                debug!(
                    "event=recipe_removed module=book id={} count={}",
                    id,
                    self.recipes.len()
                );
                self.notify();
                true
            }
            None => {
                debug!("event=recipe_remove_skipped module=book id={} reason=absent", id);
                false
            }
        }
    }

    /// Substitutes `new` for the recipe with `old`, re-sorts and notifies.
    pub fn replace(&mut self, old: RecipeId, new: Recipe) -> bool {
        if new.is_null() {
            return false;
        }
        match self.position(old) {
            Some(index) => {
                debug!(
                    "event=recipe_replaced module=book old_id={} new_id={}",
                    old,
                    new.id()
                );
                self.recipes[index] = new;
                self.resort();
                self.notify();
                true
            }
            None => {
                debug!("event=recipe_replace_skipped module=book id={} reason=absent", old);
                false
            }
        }
    }

    /// Swaps the ordering, re-sorts and notifies.
    pub fn set_sort_strategy(&mut self, strategy: SortStrategy) {
        debug!(
            "event=sort_strategy_changed module=book strategy={}",
            strategy.as_str()
        );
        self.strategy = strategy;
        self.resort();
        self.notify();
    }

    pub fn sort_strategy(&self) -> SortStrategy {
        self.strategy
    }

    /// Recipes matching `query`, in collection order.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        let expression = KeywordExpression::new(query);
        self.recipes
            .iter()
            .filter(|recipe| expression.interpret(recipe))
            .collect()
    }

    /// Forward iteration over the collection in its current order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.recipes.iter(),
        }
    }

    /// The ordered recipes as a slice.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipe at `index`, or the null recipe.
    pub fn get(&self, index: usize) -> &Recipe {
        self.recipes.get(index).unwrap_or_else(|| Recipe::null())
    }

    /// Recipe with `id`, or the null recipe.
    pub fn find(&self, id: RecipeId) -> &Recipe {
        self.position(id)
            .map(|index| &self.recipes[index])
            .unwrap_or_else(|| Recipe::null())
    }

    pub fn position(&self, id: RecipeId) -> Option<usize> {
        self.recipes.iter().position(|recipe| recipe.id() == id)
    }

    pub fn contains(&self, id: RecipeId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Registers an observer. It is not called for past changes.
    pub fn subscribe(&mut self, observer: impl CollectionObserver + 'static) -> ObserverId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Unregisters an observer. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Counter bumped on every notification, for hosts that poll.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn resort(&mut self) {
        self.strategy.sort_in_place(&mut self.recipes);
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.observers.notify(&self.recipes);
    }
}

impl std::fmt::Debug for RecipeBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeBook")
            .field("recipes", &self.recipes)
            .field("strategy", &self.strategy)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}

/// Iteration view over a [`RecipeBook`].
///
/// The borrow it holds keeps the book from changing while iterating; call
/// [`RecipeBook::iter`] again to restart.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Recipe>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Recipe;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RecipeBook {
    type Item = &'a Recipe;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn carbonara() -> Recipe {
        Recipe::new("Carbonara", ["Pasta", "Eggs", "Bacon"], "Boil pasta...", 20)
    }

    fn caesar() -> Recipe {
        Recipe::new("Caesar", ["Lettuce", "Chicken", "Croutons"], "Toss...", 15)
    }

    fn names(book: &RecipeBook) -> Vec<&str> {
        book.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_add_keeps_collection_sorted() {
        let mut book = RecipeBook::new();
        book.add(carbonara());
        book.add(caesar());
        assert_eq!(names(&book), vec!["Caesar", "Carbonara"]);
    }

    #[test]
    fn test_switching_to_preparation_time() {
        let mut book = RecipeBook::new();
        book.add(Recipe::new("Alpha", ["x"], "", 30));
        book.add(carbonara());
        book.add(caesar());
        book.set_sort_strategy(SortStrategy::ByPreparationTime);

        let order: Vec<(&str, u32)> = book
            .iter()
            .map(|r| (r.name(), r.preparation_time_minutes()))
            .collect();
        assert_eq!(order, vec![("Caesar", 15), ("Carbonara", 20), ("Alpha", 30)]);
        assert_eq!(book.sort_strategy(), SortStrategy::ByPreparationTime);
    }

    #[test]
    fn test_search_chicken_finds_caesar() {
        let mut book = RecipeBook::new();
        book.add(carbonara());
        book.add(caesar());

        let results = book.search("chicken");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "Caesar");
        assert_eq!(book.search("").len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut book = RecipeBook::new();
        book.add(carbonara());
        let revision = book.revision();

        assert!(!book.remove(caesar().id()));
        assert_eq!(book.len(), 1);
        assert_eq!(book.revision(), revision);
    }

    #[test]
    fn test_replace_substitutes_and_resorts() {
        let mut book = RecipeBook::new();
        let old = carbonara();
        book.add(old.clone());
        book.add(caesar());

        let new = Recipe::new("Amatriciana", ["Pasta", "Guanciale"], "", 25);
        assert!(book.replace(old.id(), new.clone()));

        assert_eq!(names(&book), vec!["Amatriciana", "Caesar"]);
        assert!(!book.contains(old.id()));
        assert!(book.contains(new.id()));

        assert!(!book.replace(old.id(), carbonara()));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_lookup_miss_returns_null_recipe() {
        let book = RecipeBook::new();
        assert!(book.get(0).is_null());
        assert!(book.find(carbonara().id()).is_null());
    }

    #[test]
    fn test_null_recipe_never_stored() {
        let mut book = RecipeBook::new();
        assert!(!book.add(Recipe::null().clone()));
        assert_eq!(book.load(vec![Recipe::null().clone(), caesar()]), 1);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_observers_see_every_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut book = RecipeBook::new();
        let sink = Arc::clone(&seen);
        let id = book.subscribe(move |recipes: &[Recipe]| {
            sink.lock().unwrap().push(recipes.len());
        });

        let recipe = carbonara();
        book.add(recipe.clone());
        book.add(caesar());
        book.set_sort_strategy(SortStrategy::ByPreparationTime);
        book.remove(recipe.id());

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 2, 1]);
        assert_eq!(book.revision(), 4);

        assert!(book.unsubscribe(id));
        book.add(carbonara());
        assert_eq!(seen.lock().unwrap().len(), 4);
        assert!(!book.unsubscribe(id));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut book = RecipeBook::new();
        book.add(carbonara());
        book.add(caesar());

        let first: Vec<_> = book.iter().map(|r| r.id()).collect();
        let second: Vec<_> = (&book).into_iter().map(|r| r.id()).collect();
        assert_eq!(first, second);
        assert_eq!(book.iter().len(), 2);
    }
}
