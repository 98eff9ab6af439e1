//! メモリ上の KeyValueStore 実装（テスト用）

use crate::ports::outbound::KeyValueStore;
use common::error::Error;
use std::collections::HashMap;
use std::sync::Mutex;

/// HashMap に値を持つ KeyValueStore
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作る
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // insert / remove は途中状態を残さないため poison は無視する
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), Error> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let kv = MemoryKeyValueStore::with_item("k", "v");
        assert_eq!(kv.get_item("k").unwrap().as_deref(), Some("v"));
        kv.set_item("k", "w").unwrap();
        assert_eq!(kv.get_item("k").unwrap().as_deref(), Some("w"));
        kv.remove_item("k").unwrap();
        assert_eq!(kv.get_item("k").unwrap(), None);
    }
}
