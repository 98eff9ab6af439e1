//! レシピ生成 Outbound ポート

use crate::domain::{Recipe, RecipeGenerationRequest};
use common::error::Error;

/// リクエストから一時的なレシピ（savedAt なし・新しい id 付き）を 1 件作る
///
/// 失敗は `Error::Http`（通信失敗・非 2xx）か `Error::Json`（応答が解釈できない）のどちらか。
/// リトライはしない。
pub trait RecipeGenerator: Send + Sync {
    fn generate(&self, request: &RecipeGenerationRequest) -> Result<Recipe, Error>;
}
