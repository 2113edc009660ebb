//! Maps user intents onto validated, undoable commands.
//!
//! The [`Dispatcher`] is a small state machine over presentation modes.
//! Only [`Mode::Browsing`] exists today; new modes (confirm-delete, bulk edit)
//! slot in here without touching the book.

use crate::book::RecipeBook;
use crate::command::{AddCommand, CommandHistory, DeleteCommand, EditCommand};
use crate::model::Recipe;
use crate::validate::{ValidationError, Validator};
use log::{debug, warn};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Add,
    Edit,
    Delete,
}

impl Intent {
    fn as_str(self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::Edit => "edit",
            Intent::Delete => "delete",
        }
    }
}

/// Presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
}

/// Result of a dispatched intent that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A command was executed and recorded.
    Applied,
    /// The input collaborator returned nothing.
    Cancelled,
    /// Edit or delete without a real selection.
    NoSelection,
}

/// External collaborator that gathers recipe data from the user.
///
/// Returning `None` means the user cancelled.
pub trait RecipeInput {
    fn new_recipe(&mut self) -> Option<Recipe>;

    fn edited_recipe(&mut self, current: &Recipe) -> Option<Recipe>;
}

/// Mutable state an intent operates on.
pub struct DispatchContext<'a> {
    pub book: &'a mut RecipeBook,
    pub history: &'a mut CommandHistory,
    pub input: &'a mut dyn RecipeInput,
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    mode: Mode,
    validator: Validator,
}

impl Dispatcher {
    pub fn new(validator: Validator) -> Self {
        Dispatcher {
            mode: Mode::Browsing,
            validator,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Handles `intent` for the current `selection`.
    ///
    /// `selection` is the null recipe when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`ValidationError`]; the book is left
    /// untouched in that case.
    pub fn dispatch(
        &mut self,
        intent: Intent,
        selection: &Recipe,
        ctx: DispatchContext<'_>,
    ) -> Result<Outcome, ValidationError> {
        let outcome = match self.mode {
            Mode::Browsing => self.browse(intent, selection, ctx),
        };
        match &outcome {
            Ok(outcome) => debug!(
                "event=intent_dispatched module=dispatch intent={} outcome={:?}",
                intent.as_str(),
                outcome
            ),
            Err(err) => warn!(
                "event=intent_rejected module=dispatch intent={} reason={}",
                intent.as_str(),
                err
            ),
        }
        outcome
    }

    fn browse(
        &self,
        intent: Intent,
        selection: &Recipe,
        ctx: DispatchContext<'_>,
    ) -> Result<Outcome, ValidationError> {
        match intent {
            Intent::Add => {
                let Some(recipe) = ctx.input.new_recipe() else {
                    return Ok(Outcome::Cancelled);
                };
                self.validator.validate(&recipe)?;
                ctx.history.execute(AddCommand::new(recipe), ctx.book);
                Ok(Outcome::Applied)
            }
            Intent::Edit => {
                if selection.is_null() {
                    return Ok(Outcome::NoSelection);
                }
                let Some(edited) = ctx.input.edited_recipe(selection) else {
                    return Ok(Outcome::Cancelled);
                };
                self.validator.validate(&edited)?;
                ctx.history
                    .execute(EditCommand::new(selection.clone(), edited), ctx.book);
                Ok(Outcome::Applied)
            }
            Intent::Delete => {
                if selection.is_null() {
                    return Ok(Outcome::NoSelection);
                }
                ctx.history
                    .execute(DeleteCommand::new(selection.clone()), ctx.book);
                Ok(Outcome::Applied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    /// Scripted stand-in for an input dialog.
    #[derive(Default)]
    struct ScriptedInput {
        next: Option<Recipe>,
        asked: usize,
    }

    impl ScriptedInput {
        fn returning(recipe: Recipe) -> Self {
            ScriptedInput {
                next: Some(recipe),
                asked: 0,
            }
        }
    }

    impl RecipeInput for ScriptedInput {
        fn new_recipe(&mut self) -> Option<Recipe> {
            self.asked += 1;
            self.next.take()
        }

        fn edited_recipe(&mut self, _current: &Recipe) -> Option<Recipe> {
            self.asked += 1;
            self.next.take()
        }
    }

    fn run(
        dispatcher: &mut Dispatcher,
        intent: Intent,
        selection: &Recipe,
        book: &mut RecipeBook,
        history: &mut CommandHistory,
        input: &mut ScriptedInput,
    ) -> Result<Outcome, ValidationError> {
        dispatcher.dispatch(
            intent,
            selection,
            DispatchContext {
                book,
                history,
                input,
            },
        )
    }

    #[test]
    fn test_add_validates_and_records() {
        let mut dispatcher = Dispatcher::default();
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        let mut input = ScriptedInput::returning(Recipe::new("Soup", ["Water"], "", 30));

        let outcome = run(
            &mut dispatcher,
            Intent::Add,
            Recipe::null(),
            &mut book,
            &mut history,
            &mut input,
        );
        assert_eq!(outcome, Ok(Outcome::Applied));
        assert_eq!(book.len(), 1);
        assert!(history.can_undo());
        assert_eq!(dispatcher.mode(), Mode::Browsing);
    }

    #[test]
    fn test_invalid_add_is_rejected() {
        let mut dispatcher = Dispatcher::default();
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        let mut input =
            ScriptedInput::returning(Recipe::new("Soup", Vec::<Ingredient>::new(), "", 30));

        let outcome = run(
            &mut dispatcher,
            Intent::Add,
            Recipe::null(),
            &mut book,
            &mut history,
            &mut input,
        );
        assert_eq!(outcome, Err(ValidationError::IngredientsRequired));
        assert!(book.is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_cancelled_add() {
        let mut dispatcher = Dispatcher::default();
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        let mut input = ScriptedInput::default();

        let outcome = run(
            &mut dispatcher,
            Intent::Add,
            Recipe::null(),
            &mut book,
            &mut history,
            &mut input,
        );
        assert_eq!(outcome, Ok(Outcome::Cancelled));
    }

    #[test]
    fn test_edit_and_delete_need_selection() {
        let mut dispatcher = Dispatcher::default();
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        let mut input = ScriptedInput::returning(Recipe::new("Stew", ["Beef"], "", 90));

        for intent in [Intent::Edit, Intent::Delete] {
            let selection = book.get(0).clone();
            let outcome = run(
                &mut dispatcher,
                intent,
                &selection,
                &mut book,
                &mut history,
                &mut input,
            );
            assert_eq!(outcome, Ok(Outcome::NoSelection));
        }
        assert_eq!(input.asked, 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_edit_then_delete_selected() {
        let mut dispatcher = Dispatcher::default();
        let mut book = RecipeBook::new();
        let mut history = CommandHistory::new();
        book.load([Recipe::new("Soup", ["Water"], "", 30)]);

        let mut input = ScriptedInput::returning(Recipe::new("Stew", ["Beef"], "", 90));
        let selection = book.get(0).clone();
        let outcome = run(
            &mut dispatcher,
            Intent::Edit,
            &selection,
            &mut book,
            &mut history,
            &mut input,
        );
        assert_eq!(outcome, Ok(Outcome::Applied));
        assert_eq!(book.get(0).name(), "Stew");

        let selection = book.get(0).clone();
        let outcome = run(
            &mut dispatcher,
            Intent::Delete,
            &selection,
            &mut book,
            &mut history,
            &mut input,
        );
        assert_eq!(outcome, Ok(Outcome::Applied));
        assert!(book.is_empty());

        assert!(history.undo(&mut book));
        assert!(history.undo(&mut book));
        assert_eq!(book.get(0).name(), "Soup");
    }
}
