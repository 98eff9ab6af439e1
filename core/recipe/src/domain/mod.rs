//! recipe 固有のドメイン型（型と不変条件）

pub mod command;
pub mod query;
pub mod recipe;
pub mod request;
pub mod timestamp;

pub use command::{OutputFormat, RecipeCommand};
pub use query::{DifficultyFilter, RecipeQuery};
pub use recipe::{Difficulty, Recipe, RecipeDraft, RecipeId, RecipePatch};
pub use request::RecipeGenerationRequest;
