pub(crate) mod app;
pub(crate) mod recipe_store;

pub(crate) use app::RecipeApp;
pub(crate) use recipe_store::{RecipeStore, StoredRecipes};
