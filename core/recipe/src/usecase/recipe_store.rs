//! レシピレコードストア
//!
//! 固定キー `saved-recipes` に Recipe の JSON 配列を置く。書き込み系はすべて
//! 全件読み込み → メモリ上で変更 → 全件書き戻し。ロックは持たない。
//! Recipe として読めない要素は一覧に出さないが、書き戻しでは元の JSON のまま残す。

use common::error::Error;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::timestamp::iso8601_millis;
use crate::domain::{Difficulty, Recipe, RecipeId, RecipePatch};
use crate::ports::outbound::KeyValueStore;

/// 保存先のキー
pub const STORAGE_KEY: &str = "saved-recipes";

/// 永続領域から読んだ結果。壊れていた場合を「本当に空」と区別する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredRecipes {
    /// キーが無い
    Missing,
    Loaded(Vec<Recipe>),
    /// 内容が解析できなかった（空として扱う）
    Recovered { reason: String },
}

impl StoredRecipes {
    pub fn into_recipes(self) -> Vec<Recipe> {
        match self {
            Self::Loaded(recipes) => recipes,
            Self::Missing | Self::Recovered { .. } => Vec::new(),
        }
    }
}

/// レシピの永続化と検索
pub struct RecipeStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

/// 保存配列の 1 要素。Recipe として読めない要素も元の JSON のまま保持し、書き戻しで失わない
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum StoredEntry {
    Recipe(Recipe),
    Unreadable(Value),
}

impl StoredEntry {
    fn from_value(value: Value) -> Self {
        match serde_json::from_value::<Recipe>(value.clone()) {
            Ok(recipe) => Self::Recipe(recipe),
            Err(_) => Self::Unreadable(value),
        }
    }

    fn recipe(&self) -> Option<&Recipe> {
        match self {
            Self::Recipe(r) => Some(r),
            Self::Unreadable(_) => None,
        }
    }

    /// 読めない要素でも "id" が文字列なら一致判定に使う
    fn has_id(&self, id: &RecipeId) -> bool {
        match self {
            Self::Recipe(r) => &r.id == id,
            Self::Unreadable(v) => v.get("id").and_then(Value::as_str) == Some(&**id),
        }
    }
}

/// JSON の配列なら要素ごとに読む。JSON でない・配列でない場合は理由を返す
fn parse_entries(raw: &str) -> Result<Vec<StoredEntry>, String> {
    match serde_json::from_str::<Value>(raw).map_err(|e| e.to_string())? {
        Value::Array(items) => Ok(items.into_iter().map(StoredEntry::from_value).collect()),
        _ => Err("saved recipes is not a JSON array".to_string()),
    }
}

impl RecipeStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, log: Arc<dyn Log>) -> Self {
        Self { kv, clock, log }
    }

    /// 保存内容を読む。JSON として壊れていれば Recovered として返し、ログに warn を残す。
    /// Recipe として読めない要素は一覧から外す（永続領域には残る）。
    /// 永続領域そのものの I/O 失敗だけがエラーになる。
    pub fn load(&self) -> Result<StoredRecipes, Error> {
        let Some(raw) = self.kv.get_item(STORAGE_KEY)? else {
            return Ok(StoredRecipes::Missing);
        };
        match parse_entries(&raw) {
            Ok(entries) => {
                let recipes: Vec<Recipe> = entries.iter().filter_map(StoredEntry::recipe).cloned().collect();
                let skipped = entries.len() - recipes.len();
                if skipped > 0 {
                    let _ = self.log.log(
                        &LogRecord::new(LogLevel::Warn, "Skipped unreadable saved recipes")
                            .layer("usecase")
                            .kind("storage")
                            .field("key", STORAGE_KEY)
                            .field("skipped", skipped),
                    );
                }
                Ok(StoredRecipes::Loaded(recipes))
            }
            Err(reason) => {
                self.warn_recovered(&reason);
                Ok(StoredRecipes::Recovered { reason })
            }
        }
    }

    /// 保存順（追加順）の全件。キーが無い・壊れている場合は空
    pub fn list(&self) -> Result<Vec<Recipe>, Error> {
        Ok(self.load()?.into_recipes())
    }

    /// savedAt を現在時刻で打刻して末尾に追加し、打刻済みのレコードを返す。
    /// id の重複は検査しない。
    pub fn append(&self, recipe: Recipe) -> Result<Recipe, Error> {
        let mut entries = self.entries()?;
        let mut stamped = recipe;
        stamped.saved_at = Some(iso8601_millis(self.clock.now_ms()));
        entries.push(StoredEntry::Recipe(stamped.clone()));
        self.write_all(&entries, "append", &stamped.id)?;
        Ok(stamped)
    }

    /// 保存順で最初に id が一致したレコード
    pub fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, Error> {
        Ok(self.list()?.into_iter().find(|r| &r.id == id))
    }

    /// 最初に一致したレコードへパッチを当てて書き戻す。
    /// 見つからなければ何もせず Ok(false)。
    pub fn update(&self, id: &RecipeId, patch: &RecipePatch) -> Result<bool, Error> {
        let mut entries = self.entries()?;
        let target = entries.iter_mut().find_map(|e| match e {
            StoredEntry::Recipe(r) if &r.id == id => Some(r),
            _ => None,
        });
        let Some(target) = target else {
            return Ok(false);
        };
        patch.apply(target);
        self.write_all(&entries, "update", id)?;
        Ok(true)
    }

    /// id が一致するレコードをすべて除いて書き戻し、除いた件数を返す。
    /// 一致が無くても書き戻す。
    pub fn delete(&self, id: &RecipeId) -> Result<usize, Error> {
        let entries = self.entries()?;
        let before = entries.len();
        let kept: Vec<StoredEntry> = entries.into_iter().filter(|e| !e.has_id(id)).collect();
        let removed = before - kept.len();
        self.write_all(&kept, "delete", id)?;
        Ok(removed)
    }

    /// 名前・料理の種類・材料名への大文字小文字を区別しない部分一致。
    /// 空キーワードの扱いは呼び出し側に任せる。
    pub fn search(&self, keyword: &str) -> Result<Vec<Recipe>, Error> {
        let keyword_lower = keyword.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.matches_keyword(&keyword_lower))
            .collect())
    }

    #[cfg_attr(not(test), allow(dead_code))] // 一覧 CLI は displayed でまとめて絞り込む
    pub fn filter_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Recipe>, Error> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.difficulty == difficulty)
            .collect())
    }

    /// 調理時間が max_minutes 以下のもの
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn filter_by_cooking_time(&self, max_minutes: u32) -> Result<Vec<Recipe>, Error> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.cooking_time <= max_minutes)
            .collect())
    }

    /// 書き込み系の出発点。壊れた内容は空から書き直す
    fn entries(&self) -> Result<Vec<StoredEntry>, Error> {
        let Some(raw) = self.kv.get_item(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match parse_entries(&raw) {
            Ok(entries) => Ok(entries),
            Err(reason) => {
                self.warn_recovered(&reason);
                Ok(Vec::new())
            }
        }
    }

    fn warn_recovered(&self, reason: &str) {
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Warn, "Error parsing saved recipes")
                .layer("usecase")
                .kind("storage")
                .field("key", STORAGE_KEY)
                .field("error", reason),
        );
    }

    fn write_all(&self, entries: &[StoredEntry], operation: &str, id: &RecipeId) -> Result<(), Error> {
        let json = serde_json::to_string(entries)?;
        self.kv.set_item(STORAGE_KEY, &json)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "recipes written")
                .layer("usecase")
                .kind("storage")
                .field("operation", operation)
                .field("recipe_id", id.to_string())
                .field("count", entries.len()),
        );
        Ok(())
    }
}
