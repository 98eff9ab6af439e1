//! Outbound ポート: アプリが外界（ストレージ・生成サービス・ID 生成）を使うための trait

pub mod key_value_store;
pub mod recipe_generator;
pub mod recipe_id_generator;

pub use key_value_store::KeyValueStore;
pub use recipe_generator::RecipeGenerator;
pub use recipe_id_generator::RecipeIdGenerator;
