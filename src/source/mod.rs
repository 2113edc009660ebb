//! Loading and saving flat recipe lists.
//!
//! A source produces [`Recipe`] values from an external representation,
//! interning ingredient names through the caller's [`IngredientFactory`].
//! A missing file or directory is not an error: it yields no recipes.

use crate::model::{IngredientFactory, Recipe};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use thiserror::Error;

/// Category assigned to records that do not name one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Errors that can occur when reading or writing recipe lists.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to access recipe file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse recipes in {path}: {source}")]
    ParseError {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode recipes: {0}")]
    EncodeError(#[from] serde_json::Error),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Path contains invalid UTF-8: {0}")]
    InvalidPath(String),
}

/// Serialized shape of one recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub preparation_time_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl RecipeRecord {
    /// Builds a recipe, interning every ingredient name.
    pub fn into_recipe(self, factory: &mut IngredientFactory) -> Recipe {
        let ingredients: Vec<_> = self
            .ingredients
            .iter()
            .map(|name| factory.ingredient(name))
            .collect();
        let mut recipe = Recipe::new(
            self.name,
            ingredients,
            self.instructions,
            self.preparation_time_minutes,
        )
        .with_category(self.category);
        recipe.set_owner(self.owner);
        recipe
    }
}

impl From<&Recipe> for RecipeRecord {
    fn from(recipe: &Recipe) -> Self {
        RecipeRecord {
            name: recipe.name().to_string(),
            category: recipe.category().unwrap_or(DEFAULT_CATEGORY).to_string(),
            ingredients: recipe
                .ingredients()
                .iter()
                .map(|ingredient| ingredient.to_string())
                .collect(),
            instructions: recipe.instructions().to_string(),
            preparation_time_minutes: recipe.preparation_time_minutes(),
            owner: recipe.owner().map(str::to_string),
        }
    }
}

/// Anything that can produce recipes.
pub trait RecipeSource {
    fn recipes(&self, factory: &mut IngredientFactory) -> Result<Vec<Recipe>, SourceError>;
}

/// A JSON file holding an array of [`RecipeRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonRecipeSource {
    path: Utf8PathBuf,
}

impl JsonRecipeSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        JsonRecipeSource { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RecipeSource for JsonRecipeSource {
    fn recipes(&self, factory: &mut IngredientFactory) -> Result<Vec<Recipe>, SourceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=source_missing module=source path={} status=empty",
                    self.path
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(SourceError::IoError(e)),
        };

        let records: Vec<RecipeRecord> =
            serde_json::from_str(&content).map_err(|source| SourceError::ParseError {
                path: self.path.clone(),
                source,
            })?;

        let recipes: Vec<Recipe> = records
            .into_iter()
            .map(|record| record.into_recipe(factory))
            .collect();
        info!(
            "event=source_loaded module=source path={} count={}",
            self.path,
            recipes.len()
        );
        Ok(recipes)
    }
}

/// Every `*.json` file directly inside a directory, read in path order.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: Utf8PathBuf,
}

impl JsonDirectorySource {
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        JsonDirectorySource { dir: dir.into() }
    }
}

impl RecipeSource for JsonDirectorySource {
    fn recipes(&self, factory: &mut IngredientFactory) -> Result<Vec<Recipe>, SourceError> {
        let pattern = self.dir.join("*.json");
        let mut paths = Vec::new();
        for entry in glob::glob(pattern.as_str())? {
            let path = entry?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| SourceError::InvalidPath(p.display().to_string()))?;
            paths.push(path);
        }
        paths.sort();

        let mut recipes = Vec::new();
        for path in paths {
            recipes.extend(JsonRecipeSource::new(path).recipes(factory)?);
        }
        Ok(recipes)
    }
}

/// Writes `recipes` to `path` as a pretty-printed JSON array.
pub fn save_recipes<'a>(
    path: &Utf8Path,
    recipes: impl IntoIterator<Item = &'a Recipe>,
) -> Result<(), SourceError> {
    let records: Vec<RecipeRecord> = recipes.into_iter().map(RecipeRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(path, json)?;
    info!(
        "event=recipes_saved module=source path={} count={}",
        path,
        records.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn temp_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    fn write_file(dir: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_applies_defaults_and_interns() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_path(&temp_dir);
        let path = write_file(
            &dir,
            "recipes.json",
            indoc! {r#"
                [
                    {"name": "Chocolate cake", "category": "Dessert", "ingredients": ["Flour", "Sugar", "Cocoa"]},
                    {"name": "Caesar salad", "ingredients": ["Lettuce", "Chicken", "Sugar"]},
                    {"name": "Plain water"}
                ]"#},
        );

        let mut factory = IngredientFactory::new();
        let recipes = JsonRecipeSource::new(path).recipes(&mut factory).unwrap();

        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0].category(), Some("Dessert"));
        assert_eq!(recipes[1].category(), Some(DEFAULT_CATEGORY));
        assert!(recipes[2].ingredients().is_empty());
        assert!(recipes[0].ingredients()[1].ptr_eq(&recipes[1].ingredients()[2]));
        assert_eq!(factory.len(), 5);
    }

    #[test]
    fn test_missing_file_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("absent.json");
        let mut factory = IngredientFactory::new();
        let recipes = JsonRecipeSource::new(path).recipes(&mut factory).unwrap();
        assert!(recipes.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(&temp_path(&temp_dir), "bad.json", r#"[{"category": "x"}]"#);
        let mut factory = IngredientFactory::new();
        let err = JsonRecipeSource::new(path)
            .recipes(&mut factory)
            .unwrap_err();
        assert!(matches!(err, SourceError::ParseError { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_path(&temp_dir).join("book.json");
        let recipes = vec![
            Recipe::new("Carbonara", ["Pasta", "Eggs"], "Boil pasta...", 20)
                .with_category("Pasta")
                .with_owner("alice"),
            Recipe::new("Toast", ["Bread"], "", 2),
        ];

        save_recipes(&path, &recipes).unwrap();

        let mut factory = IngredientFactory::new();
        let loaded = JsonRecipeSource::new(path.clone())
            .recipes(&mut factory)
            .unwrap();
        let records: Vec<RecipeRecord> = loaded.iter().map(RecipeRecord::from).collect();
        assert_eq!(records[0], RecipeRecord::from(&recipes[0]));
        assert_eq!(records[1].category, DEFAULT_CATEGORY);
        assert_eq!(records[1].owner, None);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("\"owner\": null"));
    }

    #[test]
    fn test_directory_source_reads_in_path_order() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_path(&temp_dir);
        write_file(&dir, "b.json", r#"[{"name": "Second"}]"#);
        write_file(&dir, "a.json", r#"[{"name": "First"}]"#);
        write_file(&dir, "notes.txt", "not json");

        let mut factory = IngredientFactory::new();
        let recipes = JsonDirectorySource::new(dir).recipes(&mut factory).unwrap();
        let names: Vec<_> = recipes.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let mut factory = IngredientFactory::new();
        let recipes = JsonDirectorySource::new("/nonexistent/recipes")
            .recipes(&mut factory)
            .unwrap();
        assert!(recipes.is_empty());
    }
}
