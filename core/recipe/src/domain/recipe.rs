//! レシピのドメイン型
//!
//! 永続化形式は camelCase の JSON（`cookingTime` / `savedAt` / `userNotes`）。
//! `saved_at` が None のレシピは生成直後の一時的なもの、Some なら保存済み。

use serde::{Deserialize, Deserializer, Serialize};

/// レシピ ID（生成時に 1 度だけ割り当て、以後不変）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for RecipeId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for RecipeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// 難易度（保存されるレシピ側は閉じた列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "初心者",
            Self::Intermediate => "中級者",
            Self::Advanced => "上級者",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty: {}", s))
    }
}

/// 材料 1 行。quantity は数値とは限らない（「少々」など）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: String,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// 手順 1 つ。step は 1 始まりの連番が想定だが強制しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub description: String,
}

impl Instruction {
    pub fn new(step: u32, description: impl Into<String>) -> Self {
        Self {
            step,
            description: description.into(),
        }
    }
}

/// レシピ（保存単位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    /// 調理時間（分）
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
    /// 初回保存時に 1 度だけ打刻する ISO8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
}

impl Recipe {
    /// 保存済みか（savedAt を持つか）
    pub fn is_saved(&self) -> bool {
        self.saved_at.is_some()
    }

    /// 名前・料理の種類・材料名のいずれかに keyword_lower を含むか。
    /// keyword_lower は呼び出し側で小文字化済みであること。
    pub fn matches_keyword(&self, keyword_lower: &str) -> bool {
        self.name.to_lowercase().contains(keyword_lower)
            || self.cuisine.to_lowercase().contains(keyword_lower)
            || self
                .ingredients
                .iter()
                .any(|ing| ing.name.to_lowercase().contains(keyword_lower))
    }
}

/// 生成サービスが返すレシピ（id・保存情報を除いた形）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    pub cooking_time: u32,
    pub difficulty: Difficulty,
    pub cuisine: String,
}

impl RecipeDraft {
    /// ID を付けて一時的なレシピにする（savedAt / userNotes は無し）
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            saved_at: None,
            user_notes: None,
        }
    }
}

/// 部分更新。Some のフィールドだけを丸ごと置き換える。id と savedAt は更新できない
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<Instruction>>,
    pub cooking_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<String>,
    pub user_notes: Option<String>,
}

impl RecipePatch {
    /// メモだけを書き換えるパッチ
    pub fn notes(text: impl Into<String>) -> Self {
        Self {
            user_notes: Some(text.into()),
            ..Self::default()
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, recipe: &mut Recipe) {
        if let Some(v) = &self.name {
            recipe.name = v.clone();
        }
        if let Some(v) = &self.ingredients {
            recipe.ingredients = v.clone();
        }
        if let Some(v) = &self.instructions {
            recipe.instructions = v.clone();
        }
        if let Some(v) = self.cooking_time {
            recipe.cooking_time = v;
        }
        if let Some(v) = self.difficulty {
            recipe.difficulty = v;
        }
        if let Some(v) = &self.cuisine {
            recipe.cuisine = v.clone();
        }
        if let Some(v) = &self.user_notes {
            recipe.user_notes = Some(v.clone());
        }
    }
}

/// LLM が quantity を数値で返すことがあるため、数値も文字列として受ける
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
