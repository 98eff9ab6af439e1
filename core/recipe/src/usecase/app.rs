//! 画面状態を持つコントローラ（生成 → 保存 → 一覧・詳細の流れ）
//!
//! ストアを変更したら必ず一覧を読み直す。失敗は操作ごとの固定メッセージを
//! state.error に入れたうえで、元のエラーをそのまま呼び出し側へ返す。

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

use crate::domain::{Recipe, RecipeGenerationRequest, RecipeId, RecipePatch, RecipeQuery};
use crate::ports::outbound::RecipeGenerator;
use crate::usecase::{RecipeStore, StoredRecipes};

pub const GENERATE_FAILED: &str = "レシピの生成に失敗しました";
pub const SAVE_FAILED: &str = "レシピの保存に失敗しました";
pub const UPDATE_FAILED: &str = "レシピの更新に失敗しました";
pub const DELETE_FAILED: &str = "レシピの削除に失敗しました";

/// 現在の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Home,
    GeneratedRecipe,
    SavedRecipes,
    RecipeDetail,
}

/// コントローラが持つ状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub view: AppView,
    /// ストアの内容（変更のたびに読み直す）
    pub recipes: Vec<Recipe>,
    /// 生成直後で未保存のレシピ
    pub generated: Option<Recipe>,
    pub selected: Option<Recipe>,
    /// 生成リクエスト中
    pub loading: bool,
    pub error: Option<String>,
    /// 保存データが壊れていて空として読んだときの理由
    pub storage_warning: Option<String>,
}

pub struct RecipeApp {
    store: RecipeStore,
    generator: Arc<dyn RecipeGenerator>,
    log: Arc<dyn Log>,
    state: AppState,
}

impl RecipeApp {
    /// ストアから一覧を読み込んで初期状態を作る
    pub fn new(
        store: RecipeStore,
        generator: Arc<dyn RecipeGenerator>,
        log: Arc<dyn Log>,
    ) -> Result<Self, Error> {
        let mut state = AppState::default();
        match store.load()? {
            StoredRecipes::Loaded(recipes) => state.recipes = recipes,
            StoredRecipes::Missing => {}
            StoredRecipes::Recovered { reason } => state.storage_warning = Some(reason),
        }
        Ok(Self {
            store,
            generator,
            log,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// レシピを生成して一時的に保持する。ストアには書かない
    pub fn generate(&mut self, request: &RecipeGenerationRequest) -> Result<Recipe, Error> {
        self.state.error = None;
        self.state.loading = true;
        let result = self.generator.generate(request);
        self.state.loading = false;

        match result {
            Ok(recipe) => {
                self.state.generated = Some(recipe.clone());
                self.state.view = AppView::GeneratedRecipe;
                Ok(recipe)
            }
            Err(e) => Err(self.fail(GENERATE_FAILED, e)),
        }
    }

    /// 保存して一覧を読み直す。保存済みのレコードを返す
    pub fn save(&mut self, recipe: Recipe) -> Result<Recipe, Error> {
        let result = self.store.append(recipe).and_then(|saved| {
            self.refresh()?;
            Ok(saved)
        });
        match result {
            Ok(saved) => {
                self.state.error = None;
                self.state.view = AppView::GeneratedRecipe;
                Ok(saved)
            }
            Err(e) => Err(self.fail(SAVE_FAILED, e)),
        }
    }

    /// 保持している生成済みレシピを保存する
    pub fn save_generated(&mut self) -> Result<Recipe, Error> {
        let Some(recipe) = self.state.generated.clone() else {
            return Err(self.fail(
                SAVE_FAILED,
                Error::invalid_argument("no generated recipe to save"),
            ));
        };
        self.save(recipe)
    }

    /// 部分更新。該当 id が無ければ何もせず Ok(false)
    pub fn update(&mut self, id: &RecipeId, patch: &RecipePatch) -> Result<bool, Error> {
        let result = self.store.update(id, patch).and_then(|found| {
            self.refresh()?;
            Ok(found)
        });
        match result {
            Ok(found) => {
                self.state.error = None;
                if found {
                    self.reselect(id);
                }
                Ok(found)
            }
            Err(e) => Err(self.fail(UPDATE_FAILED, e)),
        }
    }

    /// 削除して一覧を読み直す。表示中のレシピだったら一覧画面へ戻る
    pub fn delete(&mut self, id: &RecipeId) -> Result<usize, Error> {
        let result = self.store.delete(id).and_then(|removed| {
            self.refresh()?;
            Ok(removed)
        });
        match result {
            Ok(removed) => {
                self.state.error = None;
                if self.state.selected.as_ref().map(|r| &r.id) == Some(id) {
                    self.state.selected = None;
                    self.state.view = AppView::SavedRecipes;
                }
                Ok(removed)
            }
            Err(e) => Err(self.fail(DELETE_FAILED, e)),
        }
    }

    /// 1 件を選んで詳細画面へ。見つからなければ None で画面は変えない
    pub fn select(&mut self, id: &RecipeId) -> Result<Option<&Recipe>, Error> {
        let Some(found) = self.store.find_by_id(id)? else {
            return Ok(None);
        };
        self.state.selected = Some(found);
        self.state.view = AppView::RecipeDetail;
        Ok(self.state.selected.as_ref())
    }

    /// 保存済み一覧画面へ
    pub fn show_saved(&mut self) {
        self.state.view = AppView::SavedRecipes;
    }

    /// 一覧画面に出すレシピ: キーワード検索 → 難易度 → 調理時間上限の順に絞り込む
    pub fn displayed(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, Error> {
        let base = match query.effective_keyword() {
            Some(keyword) => self.store.search(keyword)?,
            None => self.state.recipes.clone(),
        };
        Ok(base
            .into_iter()
            .filter(|r| query.difficulty.accepts(r.difficulty))
            .filter(|r| r.cooking_time <= query.max_cooking_time)
            .collect())
    }

    fn refresh(&mut self) -> Result<(), Error> {
        self.state.recipes = self.store.list()?;
        Ok(())
    }

    /// 更新後に詳細表示中のレシピを最新へ差し替える
    fn reselect(&mut self, id: &RecipeId) {
        if self.state.selected.as_ref().map(|r| &r.id) == Some(id) {
            self.state.selected = self.state.recipes.iter().find(|r| &r.id == id).cloned();
        }
    }

    fn fail(&mut self, message: &str, error: Error) -> Error {
        self.state.error = Some(message.to_string());
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Error, message)
                .layer("usecase")
                .kind("error")
                .field("error", error.to_string()),
        );
        error
    }
}
