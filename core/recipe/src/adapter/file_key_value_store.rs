//! ファイルによる KeyValueStore 実装
//!
//! 1 キー 1 ファイル（`<dir>/<key>.json`）。書き込みは一時ファイルへ書いてから rename する。

use crate::ports::outbound::KeyValueStore;
use common::error::Error;
use common::ports::outbound::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// データディレクトリ配下のファイルに値を置く KeyValueStore
pub struct FileKeyValueStore {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl AsRef<Path>) -> Self {
        Self {
            fs,
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, Error> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// キーはファイル名になるため [A-Za-z0-9_-] のみ許す
fn validate_key(key: &str) -> Result<(), Error> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!("invalid storage key: {:?}", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path_for(key)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        self.fs.read_to_string(&path).map(Some)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        self.fs.create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        self.fs.write(&tmp, value)?;
        self.fs.rename(&tmp, &path)
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        let path = self.path_for(key)?;
        if self.fs.exists(&path) {
            self.fs.remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::StdFileSystem;
    use tempfile::tempdir;

    fn store(dir: &Path) -> FileKeyValueStore {
        FileKeyValueStore::new(Arc::new(StdFileSystem), dir.join("storage"))
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().unwrap();
        assert_eq!(store(dir.path()).get_item("saved-recipes").unwrap(), None);
    }

    #[test]
    fn test_set_get_overwrite_remove() {
        let dir = tempdir().unwrap();
        let kv = store(dir.path());
        kv.set_item("saved-recipes", "[]").unwrap();
        assert_eq!(kv.get_item("saved-recipes").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("storage/saved-recipes.json").is_file());
        assert!(!dir.path().join("storage/.saved-recipes.json.tmp").exists());

        kv.set_item("saved-recipes", "[1]").unwrap();
        assert_eq!(kv.get_item("saved-recipes").unwrap().as_deref(), Some("[1]"));

        kv.remove_item("saved-recipes").unwrap();
        assert_eq!(kv.get_item("saved-recipes").unwrap(), None);
        kv.remove_item("saved-recipes").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let kv = store(dir.path());
        for key in ["", "../x", "a/b", "a.b"] {
            let err = kv.set_item(key, "v").unwrap_err();
            assert!(err.is_usage(), "key {:?}", key);
        }
    }
}
