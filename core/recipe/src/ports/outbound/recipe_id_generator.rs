//! レシピ ID 生成 Outbound ポート
//!
//! usecase は RecipeIdGenerator を注入し、テストでは固定 ID を返す実装を渡せる。

use crate::domain::RecipeId;

/// RecipeId を生成する抽象（Outbound ポート）
pub trait RecipeIdGenerator: Send + Sync {
    fn next_id(&self) -> RecipeId;
}
