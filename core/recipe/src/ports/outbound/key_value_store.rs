//! キー・バリュー永続領域 Outbound ポート
//!
//! ブラウザの localStorage 相当。レコードストアはこの trait 経由で読み書きし、
//! テストではメモリ実装に差し替える。

use common::error::Error;

/// 文字列キーに文字列値を保存する永続領域
///
/// 実装は `FileKeyValueStore`（データディレクトリ配下のファイル）や `MemoryKeyValueStore` など。
/// ロックは持たない。同時に書き込むプロセスが複数あれば後勝ちで更新が失われる。
pub trait KeyValueStore: Send + Sync {
    /// 値を読む（キーが無ければ None）
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;
    /// 値を丸ごと書き換える
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;
    /// キーを消す（無ければ何もしない）
    #[cfg_attr(not(test), allow(dead_code))] // レコードストアは空配列を書き戻すため消さない
    fn remove_item(&self, key: &str) -> Result<(), Error>;
}
