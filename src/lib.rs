pub mod access;
pub mod book;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod draft;
pub mod export;
pub mod ffi;
pub mod logging;
pub mod mediator;
pub mod model;
pub mod search;
pub mod session;
pub mod sort;
pub mod source;
pub mod validate;

pub use access::ProtectedRecipe;
pub use book::RecipeBook;
pub use command::CommandHistory;
pub use config::BookConfig;
pub use model::*;
pub use session::RecipeSession;
pub use sort::SortStrategy;

uniffi::setup_scaffolding!();
