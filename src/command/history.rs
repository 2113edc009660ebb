use super::Command;
use crate::book::RecipeBook;
use log::debug;
use std::collections::VecDeque;

/// Number of undo steps kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Undo/redo stacks of executed commands.
///
/// Executing a new command clears the redo stack. When the undo stack grows
/// past the limit, the oldest command is dropped.
#[derive(Debug)]
pub struct CommandHistory {
    undo: VecDeque<Box<dyn Command>>,
    redo: Vec<Box<dyn Command>>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        CommandHistory::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero is treated as one.
    pub fn with_limit(limit: usize) -> Self {
        CommandHistory {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Runs `command` against `book` and records it.
    pub fn execute(&mut self, command: impl Command + 'static, book: &mut RecipeBook) {
        self.execute_boxed(Box::new(command), book);
    }

    pub fn execute_boxed(&mut self, command: Box<dyn Command>, book: &mut RecipeBook) {
        command.execute(book);
        debug!(
            "event=command_executed module=command kind={} undo_depth={}",
            command.label(),
            self.undo.len() + 1
        );
        self.redo.clear();
        self.undo.push_back(command);
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }

    /// Undoes the most recent command. Returns `false` if there is none.
    pub fn undo(&mut self, book: &mut RecipeBook) -> bool {
        let Some(command) = self.undo.pop_back() else {
            return false;
        };
        command.undo(book);
        debug!("event=command_undone module=command kind={}", command.label());
        self.redo.push(command);
        true
    }

    /// Re-executes the most recently undone command. Returns `false` if there
    /// is none.
    pub fn redo(&mut self, book: &mut RecipeBook) -> bool {
        let Some(command) = self.redo.pop() else {
            return false;
        };
        command.execute(book);
        debug!("event=command_redone module=command kind={}", command.label());
        self.undo.push_back(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AddCommand, DeleteCommand, EditCommand};
    use crate::model::Recipe;

    fn recipe(name: &str) -> Recipe {
        Recipe::new(name, ["Salt"], "", 5)
    }

    fn names(book: &RecipeBook) -> Vec<String> {
        book.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn test_undo_and_redo() {
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();

        history.execute(AddCommand::new(recipe("Soup")), &mut book);
        history.execute(AddCommand::new(recipe("Bread")), &mut book);
        assert_eq!(names(&book), vec!["Bread", "Soup"]);

        assert!(history.undo(&mut book));
        assert_eq!(names(&book), vec!["Soup"]);
        assert!(history.can_redo());

        assert!(history.redo(&mut book));
        assert_eq!(names(&book), vec!["Bread", "Soup"]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        let soup = recipe("Soup");

        history.execute(AddCommand::new(soup.clone()), &mut book);
        history.execute(DeleteCommand::new(soup.clone()), &mut book);
        assert!(history.undo(&mut book));
        assert_eq!(history.redo_len(), 1);

        history.execute(EditCommand::new(soup.clone(), recipe("Stew")), &mut book);
        assert_eq!(history.redo_len(), 0);
        assert!(!history.redo(&mut book));
        assert_eq!(names(&book), vec!["Stew"]);
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        assert!(!history.undo(&mut book));
        assert!(!history.redo(&mut book));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::with_limit(2);

        for name in ["a", "b", "c"] {
            history.execute(AddCommand::new(recipe(name)), &mut book);
        }
        assert_eq!(history.undo_len(), 2);

        assert!(history.undo(&mut book));
        assert!(history.undo(&mut book));
        assert!(!history.undo(&mut book));
        assert_eq!(names(&book), vec!["a"]);
    }

    #[test]
    fn test_clear() {
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::with_limit(0);
        assert_eq!(history.limit(), 1);
        history.execute(AddCommand::new(recipe("a")), &mut book);
        history.clear();
        assert!(!history.can_undo());
        assert_eq!(book.len(), 1);
    }
}
