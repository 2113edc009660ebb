//! UniFFI bindings for cross-platform hosts (iOS, Android, desktop scripting).
//!
//! Hosts drive a [`FfiRecipeBook`], which wraps a [`RecipeSession`] behind a
//! mutex. Recipes cross the boundary as plain [`FfiRecipe`] records and are
//! addressed by their id string.

use crate::access::{ProtectedRecipe, ACCESS_DENIED};
use crate::config::{BookConfig, ConfigError};
use crate::dispatch::{Intent, Outcome};
use crate::draft::{DraftError, RecipeDraft};
use crate::logging::{self, LoggingError};
use crate::model::{Recipe, RecipeId};
use crate::session::{PreparedInput, RecipeSession};
use crate::sort::SortStrategy;
use crate::source::{JsonRecipeSource, SourceError};
use crate::validate::ValidationError;
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeBookError {
    #[error("Invalid recipe: {message}")]
    InvalidRecipe { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid recipe id: {message}")]
    InvalidId { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },
}

impl From<ValidationError> for RecipeBookError {
    fn from(e: ValidationError) -> Self {
        RecipeBookError::InvalidRecipe {
            message: e.to_string(),
        }
    }
}

impl From<DraftError> for RecipeBookError {
    fn from(e: DraftError) -> Self {
        RecipeBookError::InvalidInput {
            message: e.to_string(),
        }
    }
}

impl From<SourceError> for RecipeBookError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::IoError(e) => RecipeBookError::IoError {
                message: e.to_string(),
            },
            SourceError::InvalidPath(p) => RecipeBookError::IoError {
                message: format!("Invalid path: {p}"),
            },
            other => RecipeBookError::ParseError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for RecipeBookError {
    fn from(e: ConfigError) -> Self {
        RecipeBookError::ConfigError {
            message: e.to_string(),
        }
    }
}

impl From<LoggingError> for RecipeBookError {
    fn from(e: LoggingError) -> Self {
        RecipeBookError::ConfigError {
            message: e.to_string(),
        }
    }
}

/// Ordering applied to the recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiSortStrategy {
    ByName,
    ByPreparationTime,
}

impl From<FfiSortStrategy> for SortStrategy {
    fn from(s: FfiSortStrategy) -> Self {
        match s {
            FfiSortStrategy::ByName => SortStrategy::ByName,
            FfiSortStrategy::ByPreparationTime => SortStrategy::ByPreparationTime,
        }
    }
}

impl From<SortStrategy> for FfiSortStrategy {
    fn from(s: SortStrategy) -> Self {
        match s {
            SortStrategy::ByName => FfiSortStrategy::ByName,
            SortStrategy::ByPreparationTime => FfiSortStrategy::ByPreparationTime,
        }
    }
}

/// What happened to a dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiOutcome {
    Applied,
    Cancelled,
    NoSelection,
}

impl From<Outcome> for FfiOutcome {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::Applied => FfiOutcome::Applied,
            Outcome::Cancelled => FfiOutcome::Cancelled,
            Outcome::NoSelection => FfiOutcome::NoSelection,
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiRecipe {
    /// Stable id used to address the recipe in later calls
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Owning user, or none for public recipes
    pub owner: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub preparation_time_minutes: u32,
    /// False when the current user may only see the id and name
    pub accessible: bool,
}

impl From<&ProtectedRecipe<'_>> for FfiRecipe {
    fn from(p: &ProtectedRecipe<'_>) -> Self {
        match p.recipe() {
            Some(r) => FfiRecipe::from(r),
            None => FfiRecipe {
                id: p.id().to_string(),
                name: p.name().to_string(),
                category: None,
                owner: p.owner().map(|s| s.to_string()),
                ingredients: Vec::new(),
                instructions: ACCESS_DENIED.to_string(),
                preparation_time_minutes: 0,
                accessible: false,
            },
        }
    }
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id().to_string(),
            name: r.name().to_string(),
            category: r.category().map(|s| s.to_string()),
            owner: r.owner().map(|s| s.to_string()),
            ingredients: r.ingredients().iter().map(|i| i.to_string()).collect(),
            instructions: r.instructions().to_string(),
            preparation_time_minutes: r.preparation_time_minutes(),
            accessible: true,
        }
    }
}

/// Raw form fields for creating or editing a recipe.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiRecipeInput {
    pub name: String,
    pub category: String,
    /// Ingredient names separated by commas or newlines
    pub ingredients: String,
    pub instructions: String,
    /// Whole minutes as typed by the user
    pub preparation_time: String,
    /// If true, the recipe is owned by the current user
    pub is_private: bool,
}

impl FfiRecipeInput {
    fn into_draft(self) -> (RecipeDraft, bool) {
        let draft = RecipeDraft {
            name: self.name,
            category: self.category,
            ingredients: self.ingredients,
            instructions: self.instructions,
            preparation_time: self.preparation_time,
        };
        (draft, self.is_private)
    }
}

/// A recipe collection with undo, sorting, search and access control.
#[derive(uniffi::Object)]
pub struct FfiRecipeBook {
    session: Mutex<RecipeSession>,
}

#[uniffi::export]
impl FfiRecipeBook {
    /// Creates an empty book with default settings.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(FfiRecipeBook::with_session(RecipeSession::default()))
    }

    /// Creates an empty book configured from a YAML document.
    #[uniffi::constructor]
    pub fn from_config_yaml(yaml: String) -> Result<Arc<Self>, RecipeBookError> {
        let config = BookConfig::from_yaml_str(&yaml)?;
        Ok(Arc::new(FfiRecipeBook::with_session(RecipeSession::new(
            config,
        ))))
    }

    /// Loads recipes from a JSON file. A missing file loads nothing.
    pub fn load_json(&self, path: String) -> Result<u32, RecipeBookError> {
        let added = self
            .session()
            .load_from(&JsonRecipeSource::new(path))?;
        Ok(u32::try_from(added).unwrap_or(u32::MAX))
    }

    /// Saves the current list to a JSON file.
    pub fn save_json(&self, path: String) -> Result<(), RecipeBookError> {
        self.session().save_to(Utf8Path::new(&path))?;
        Ok(())
    }

    pub fn add_recipe(&self, input: FfiRecipeInput) -> Result<FfiOutcome, RecipeBookError> {
        self.submit(Intent::Add, None, Some(input))
    }

    pub fn edit_recipe(
        &self,
        id: String,
        input: FfiRecipeInput,
    ) -> Result<FfiOutcome, RecipeBookError> {
        let id = parse_id(&id)?;
        self.submit(Intent::Edit, Some(id), Some(input))
    }

    pub fn delete_recipe(&self, id: String) -> Result<FfiOutcome, RecipeBookError> {
        let id = parse_id(&id)?;
        self.submit(Intent::Delete, Some(id), None)
    }

    /// Returns false if there was nothing to undo.
    pub fn undo(&self) -> bool {
        self.session().undo()
    }

    /// Returns false if there was nothing to redo.
    pub fn redo(&self) -> bool {
        self.session().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session().history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session().history().can_redo()
    }

    pub fn set_sort_strategy(&self, strategy: FfiSortStrategy) {
        self.session().set_sort_strategy(strategy.into());
    }

    pub fn sort_strategy(&self) -> FfiSortStrategy {
        self.session().book().sort_strategy().into()
    }

    /// All recipes in display order, as seen by the current user.
    pub fn recipes(&self) -> Vec<FfiRecipe> {
        let session = self.session();
        session.recipes().iter().map(FfiRecipe::from).collect()
    }

    /// Recipes whose name or an ingredient contains `query`, ignoring case.
    pub fn search(&self, query: String) -> Vec<FfiRecipe> {
        let session = self.session();
        session.search(&query).iter().map(FfiRecipe::from).collect()
    }

    /// Summary of a recipe as visible to the current user.
    pub fn describe(&self, id: String) -> Result<String, RecipeBookError> {
        let id = parse_id(&id)?;
        Ok(self.session().describe(id))
    }

    /// Plain-text export of a recipe, or the access-denied marker.
    pub fn export_text(&self, id: String) -> Result<String, RecipeBookError> {
        let id = parse_id(&id)?;
        Ok(self.session().export(id))
    }

    pub fn set_current_user(&self, user: String) {
        self.session().set_current_user(user);
    }

    /// Increases on every change to the list. Hosts poll it to refresh.
    pub fn revision(&self) -> u64 {
        self.session().book().revision()
    }
}

impl FfiRecipeBook {
    fn with_session(session: RecipeSession) -> Self {
        FfiRecipeBook {
            session: Mutex::new(session),
        }
    }

    fn session(&self) -> MutexGuard<'_, RecipeSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn submit(
        &self,
        intent: Intent,
        selection: Option<RecipeId>,
        input: Option<FfiRecipeInput>,
    ) -> Result<FfiOutcome, RecipeBookError> {
        let mut session = self.session();
        let mut prepared = match input {
            Some(input) => {
                let (draft, private) = input.into_draft();
                PreparedInput::new(session.recipe_from_draft(draft, private)?)
            }
            None => PreparedInput::cancelled(),
        };
        let outcome = session.dispatch(intent, selection, &mut prepared)?;
        Ok(outcome.into())
    }
}

fn parse_id(id: &str) -> Result<RecipeId, RecipeBookError> {
    RecipeId::parse_str(id.trim()).map_err(|e| RecipeBookError::InvalidId {
        message: format!("{id}: {e}"),
    })
}

/// Starts stderr logging at `level` (trace, debug, info, warn or error).
#[uniffi::export]
pub fn init_logging(level: String) -> Result<(), RecipeBookError> {
    logging::init_logging(&level)?;
    Ok(())
}

/// Returns the level logging would use if the host has no preference.
#[uniffi::export]
pub fn default_log_level() -> String {
    logging::default_log_level().to_string()
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
