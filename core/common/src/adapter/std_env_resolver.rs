//! 標準環境変数解決実装（std::env を委譲）

use crate::domain::DataDir;
use crate::error::Error;
use crate::ports::outbound::EnvResolver;
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "recipe-ai";

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.is_empty())
    }

    fn resolve_data_dir(&self) -> Result<DataDir, Error> {
        resolve_data_dir_with(|name| self.var(name))
    }
}

/// 変数の読み方を差し替えられる解決ロジック（テストで環境を汚さないため分離）
fn resolve_data_dir_with(var: impl Fn(&str) -> Option<String>) -> Result<DataDir, Error> {
    if let Some(home) = var("RECIPE_HOME") {
        return Ok(DataDir::new(PathBuf::from(home)));
    }

    let data_base = var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| var("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
        .ok_or_else(|| Error::env("HOME is not set"))?;

    Ok(DataDir::new(data_base.join(APP_DIR)))
}
