//! 保存済み一覧の絞り込み条件（検索キーワード・難易度・調理時間の上限）

use crate::domain::Difficulty;

/// 一覧画面の調理時間スライダーの既定上限（分）
pub const DEFAULT_MAX_COOKING_TIME: u32 = 180;

/// 難易度フィルタ（"all" は絞り込みなし）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn accepts(&self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => *d == difficulty,
        }
    }
}

impl std::str::FromStr for DifficultyFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<Difficulty>().map(Self::Only)
    }
}

/// 一覧表示の条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeQuery {
    /// 前後空白を除いて空ならキーワード検索をしない
    pub keyword: Option<String>,
    pub difficulty: DifficultyFilter,
    pub max_cooking_time: u32,
}

impl Default for RecipeQuery {
    fn default() -> Self {
        Self {
            keyword: None,
            difficulty: DifficultyFilter::All,
            max_cooking_time: DEFAULT_MAX_COOKING_TIME,
        }
    }
}

impl RecipeQuery {
    /// 検索に使うキーワード（空白のみなら None）
    pub fn effective_keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }
}
