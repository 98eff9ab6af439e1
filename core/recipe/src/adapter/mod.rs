//! アダプター（recipe 固有ポートの標準実装）

mod chat_recipe_generator;
mod file_key_value_store;
#[cfg(test)]
mod memory_key_value_store;
mod prompt;
mod std_recipe_id_generator;

pub use chat_recipe_generator::ChatRecipeGenerator;
pub use file_key_value_store::FileKeyValueStore;
#[cfg(test)]
pub use memory_key_value_store::MemoryKeyValueStore;
pub use std_recipe_id_generator::StdRecipeIdGenerator;
