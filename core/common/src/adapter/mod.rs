//! アダプター（ポートの標準実装）
//!
//! usecase はポートの trait 経由でのみファイル・時刻・環境変数・HTTP に触れる。
//! 実装は標準実装（Std*）やテスト用のモックを注入する。

pub mod file_json_log;
pub mod human_log;
pub mod reqwest_http;
pub mod std_clock;
pub mod std_env_resolver;
pub mod std_fs;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use human_log::{StderrLog, TeeLog};
pub use reqwest_http::ReqwestHttpClient;
pub use std_clock::StdClock;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
