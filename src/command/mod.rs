//! Undoable mutations of a [`RecipeBook`].
//!
//! Commands carry the recipes they act on and receive the book when they
//! run, so one command value can be executed, undone and redone against the
//! same book any number of times. Use a [`CommandHistory`] to get undo/redo.

use crate::book::RecipeBook;
use crate::model::Recipe;
use std::fmt;

mod history;

pub use history::{CommandHistory, DEFAULT_HISTORY_LIMIT};

/// An executable, reversible unit of mutation.
pub trait Command: Send + fmt::Debug {
    fn execute(&self, book: &mut RecipeBook);

    fn undo(&self, book: &mut RecipeBook);

    /// Short name used in logs.
    fn label(&self) -> &'static str;
}

/// Adds a recipe; undo removes it again.
#[derive(Debug, Clone)]
pub struct AddCommand {
    recipe: Recipe,
}

impl AddCommand {
    pub fn new(recipe: Recipe) -> Self {
        AddCommand { recipe }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}

impl Command for AddCommand {
    fn execute(&self, book: &mut RecipeBook) {
        book.add(self.recipe.clone());
    }

    fn undo(&self, book: &mut RecipeBook) {
        book.remove(self.recipe.id());
    }

    fn label(&self) -> &'static str {
        "add"
    }
}

/// Removes a recipe; undo puts the same recipe back.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    recipe: Recipe,
}

impl DeleteCommand {
    pub fn new(recipe: Recipe) -> Self {
        DeleteCommand { recipe }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }
}

impl Command for DeleteCommand {
    fn execute(&self, book: &mut RecipeBook) {
        book.remove(self.recipe.id());
    }

    fn undo(&self, book: &mut RecipeBook) {
        book.add(self.recipe.clone());
    }

    fn label(&self) -> &'static str {
        "delete"
    }
}

/// Replaces `old` with `new`; undo swaps them back.
#[derive(Debug, Clone)]
pub struct EditCommand {
    old: Recipe,
    new: Recipe,
}

impl EditCommand {
    pub fn new(old: Recipe, new: Recipe) -> Self {
        EditCommand { old, new }
    }

    pub fn old(&self) -> &Recipe {
        &self.old
    }

    pub fn new_recipe(&self) -> &Recipe {
        &self.new
    }
}

impl Command for EditCommand {
    fn execute(&self, book: &mut RecipeBook) {
        book.replace(self.old.id(), self.new.clone());
    }

    fn undo(&self, book: &mut RecipeBook) {
        book.replace(self.new.id(), self.old.clone());
    }

    fn label(&self) -> &'static str {
        "edit"
    }
}
