//! 環境変数解決 Outbound ポート
//!
//! データディレクトリと API キーを環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::DataDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// 環境変数を 1 つ読む（未設定・空文字は None）
    fn var(&self, name: &str) -> Option<String>;

    /// データディレクトリを解決する
    ///
    /// 優先順位:
    /// 1. RECIPE_HOME（設定されていれば）
    /// 2. $XDG_DATA_HOME/recipe-ai
    /// 3. $HOME/.local/share/recipe-ai
    fn resolve_data_dir(&self) -> Result<DataDir, Error>;
}
