//! recipe コマンドの enum（Command Pattern）
//!
//! サブコマンドごとの分岐を enum で明示する。

use crate::domain::{RecipeGenerationRequest, RecipeId, RecipeQuery};

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// recipe の実行モード
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeCommand {
    /// レシピを生成して表示（save なら続けて保存）
    Generate {
        request: RecipeGenerationRequest,
        save: bool,
    },
    /// 保存済みレシピの一覧（検索・絞り込み）
    List { query: RecipeQuery },
    /// 1 件の詳細表示
    Show { id: RecipeId },
    /// メモの書き換え
    Note { id: RecipeId, text: String },
    /// 削除
    Delete { id: RecipeId },
}

impl RecipeCommand {
    /// ログ用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Note { .. } => "note",
            Self::Delete { .. } => "delete",
        }
    }
}
