//! Application root tying the engine together.
//!
//! A [`RecipeSession`] owns one [`RecipeBook`], its undo history, the
//! intent dispatcher and the ingredient factory, all configured from a
//! [`BookConfig`]. Hosts talk to the session; the session talks to the
//! book.

use crate::access::{ProtectedRecipe, ACCESS_DENIED};
use crate::book::{CollectionObserver, ObserverId, RecipeBook};
use crate::command::{Command, CommandHistory};
use crate::config::BookConfig;
use crate::dispatch::{DispatchContext, Dispatcher, Intent, Outcome, RecipeInput};
use crate::draft::{DraftError, RecipeDraft};
use crate::export::TextExporter;
use crate::model::{IngredientFactory, Recipe, RecipeComponent, RecipeId};
use crate::search::{Expression, KeywordExpression};
use crate::sort::SortStrategy;
use crate::source::{save_recipes, RecipeSource, SourceError};
use crate::validate::{ValidationError, Validator};
use camino::Utf8Path;
use log::info;

/// A [`RecipeInput`] that answers once with a recipe prepared in advance.
///
/// Useful for hosts that collect form data before dispatching.
#[derive(Debug, Clone, Default)]
pub struct PreparedInput(Option<Recipe>);

impl PreparedInput {
    pub fn new(recipe: Recipe) -> Self {
        PreparedInput(Some(recipe))
    }

    pub fn cancelled() -> Self {
        PreparedInput(None)
    }
}

impl RecipeInput for PreparedInput {
    fn new_recipe(&mut self) -> Option<Recipe> {
        self.0.take()
    }

    fn edited_recipe(&mut self, _current: &Recipe) -> Option<Recipe> {
        self.0.take()
    }
}

#[derive(Debug)]
pub struct RecipeSession {
    book: RecipeBook,
    history: CommandHistory,
    dispatcher: Dispatcher,
    factory: IngredientFactory,
    config: BookConfig,
}

impl Default for RecipeSession {
    fn default() -> Self {
        RecipeSession::new(BookConfig::default())
    }
}

impl RecipeSession {
    pub fn new(config: BookConfig) -> Self {
        info!(
            "event=session_created module=session user={} strategy={} history_limit={}",
            config.current_user,
            config.sort_strategy.as_str(),
            config.history_limit
        );
        RecipeSession {
            book: RecipeBook::with_strategy(config.sort_strategy),
            history: CommandHistory::with_limit(config.history_limit),
            dispatcher: Dispatcher::new(Validator::standard()),
            factory: IngredientFactory::new(),
            config,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn factory(&self) -> &IngredientFactory {
        &self.factory
    }

    pub fn current_user(&self) -> &str {
        &self.config.current_user
    }

    pub fn set_current_user(&mut self, user: impl Into<String>) {
        self.config.current_user = user.into();
    }

    /// Initial population. Not recorded in the undo history.
    pub fn load_from(&mut self, source: &dyn RecipeSource) -> Result<usize, SourceError> {
        let recipes = source.recipes(&mut self.factory)?;
        Ok(self.book.load(recipes))
    }

    /// Writes the book in its current order to `path`.
    pub fn save_to(&self, path: &Utf8Path) -> Result<(), SourceError> {
        save_recipes(path, self.book.iter())
    }

    /// Dispatches `intent` against the recipe with id `selection`.
    ///
    /// An unknown or absent selection counts as no selection.
    pub fn dispatch(
        &mut self,
        intent: Intent,
        selection: Option<RecipeId>,
        input: &mut dyn RecipeInput,
    ) -> Result<Outcome, ValidationError> {
        let selected = match selection {
            Some(id) => self.book.find(id).clone(),
            None => Recipe::null().clone(),
        };
        self.dispatcher.dispatch(
            intent,
            &selected,
            DispatchContext {
                book: &mut self.book,
                history: &mut self.history,
                input,
            },
        )
    }

    /// Executes `command` directly, bypassing validation.
    pub fn execute(&mut self, command: impl Command + 'static) {
        self.history.execute(command, &mut self.book);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.book)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.book)
    }

    pub fn set_sort_strategy(&mut self, strategy: SortStrategy) {
        self.config.sort_strategy = strategy;
        self.book.set_sort_strategy(strategy);
    }

    /// Every recipe in collection order, as seen by the current user.
    pub fn recipes(&self) -> Vec<ProtectedRecipe<'_>> {
        self.book.iter().map(|recipe| self.proxy(recipe)).collect()
    }

    /// Recipes matching `query`, as seen by the current user.
    ///
    /// Recipes the user cannot read are matched on their name only.
    pub fn search(&self, query: &str) -> Vec<ProtectedRecipe<'_>> {
        let expression = KeywordExpression::new(query);
        self.recipes()
            .into_iter()
            .filter(|proxy| match proxy.recipe() {
                Some(recipe) => expression.interpret(recipe),
                None => expression.matches_name(proxy.name()),
            })
            .collect()
    }

    pub fn subscribe(&mut self, observer: impl CollectionObserver + 'static) -> ObserverId {
        self.book.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.book.unsubscribe(id)
    }

    /// Access-controlled view of a recipe for the current user.
    pub fn protected(&self, id: RecipeId) -> ProtectedRecipe<'_> {
        self.proxy(self.book.find(id))
    }

    fn proxy<'a>(&'a self, recipe: &'a Recipe) -> ProtectedRecipe<'a> {
        ProtectedRecipe::new(recipe, &self.config.current_user)
    }

    pub fn describe(&self, id: RecipeId) -> String {
        self.protected(id).description()
    }

    /// Plain-text export of the recipe with `id`, or [`ACCESS_DENIED`] when
    /// the current user cannot read it.
    pub fn export(&self, id: RecipeId) -> String {
        match self.protected(id).recipe() {
            Some(recipe) => recipe.accept(&mut TextExporter),
            None => ACCESS_DENIED.to_string(),
        }
    }

    /// Parses `draft`, interning its ingredients in the session factory.
    ///
    /// Blank categories fall back to the configured default. Private recipes
    /// are owned by the current user.
    pub fn recipe_from_draft(
        &mut self,
        draft: RecipeDraft,
        private: bool,
    ) -> Result<Recipe, DraftError> {
        let owner = private.then_some(self.config.current_user.as_str());
        let mut recipe = draft.into_recipe(&mut self.factory, owner)?;
        if recipe.category().is_none() {
            recipe.set_category(Some(self.config.default_category.clone()));
        }
        Ok(recipe)
    }
}
