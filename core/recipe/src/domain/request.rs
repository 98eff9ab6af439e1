//! レシピ生成リクエスト
//!
//! difficulty は自由記述のまま運ぶ（列挙への対応付けは生成サービス側の責務）。

use common::error::Error;

/// レシピ生成の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeGenerationRequest {
    /// 使いたい材料（カンマ区切りは UI 上の慣習で、構造としては強制しない）
    pub ingredients: String,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    /// 調理時間の上限（分）
    pub cooking_time: Option<u32>,
}

impl RecipeGenerationRequest {
    /// 前後の空白を除いて組み立てる。材料が空なら InvalidArgument。
    /// 空文字の任意項目と 0 分の上限は未指定として扱う。
    pub fn new(
        ingredients: &str,
        cuisine: Option<&str>,
        difficulty: Option<&str>,
        cooking_time: Option<u32>,
    ) -> Result<Self, Error> {
        let ingredients = ingredients.trim();
        if ingredients.is_empty() {
            return Err(Error::invalid_argument("ingredients are required"));
        }
        Ok(Self {
            ingredients: ingredients.to_string(),
            cuisine: non_empty(cuisine),
            difficulty: non_empty(difficulty),
            cooking_time: cooking_time.filter(|&m| m > 0),
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_drops_empty_optionals() {
        let req = RecipeGenerationRequest::new(" 鶏肉, 玉ねぎ ", Some(" "), Some("easy"), Some(0)).unwrap();
        assert_eq!(req.ingredients, "鶏肉, 玉ねぎ");
        assert_eq!(req.cuisine, None);
        assert_eq!(req.difficulty.as_deref(), Some("easy"));
        assert_eq!(req.cooking_time, None);
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let err = RecipeGenerationRequest::new("   ", None, None, None).unwrap_err();
        assert!(err.is_usage());
    }
}
