//! キーバリューストア抽象
//!
//! ブラウザのlocalStorage/sessionStorage、CLIのJSONファイル、
//! テスト用のメモリストアを同じインターフェースで扱う。
//! 値は文字列（JSONシリアライズ済み）で保存する。

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// フィールドラベル上書きマップのキー
pub const LABELS_KEY: &str = "customLabels";
/// セクションタイトル上書きマップのキー
pub const TITLES_KEY: &str = "customTitles";
/// 画像回転状態のキー接頭辞（訪問IDごと）
pub const ROTATIONS_KEY_PREFIX: &str = "imageRotations:";
/// 訪問一覧キャッシュのキー（セッションストア）
pub const VISITS_CACHE_KEY: &str = "visitsCache";
/// 認証トークンのキー
pub const TOKEN_KEY: &str = "token";

/// 訪問IDごとの回転状態キー
pub fn rotations_key(visit_id: i64) -> String {
    format!("{}{}", ROTATIONS_KEY_PREFIX, visit_id)
}

/// 文字列キーバリューストア
///
/// 読み書きは同期・後勝ち。
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// JSONとして読み込む（壊れた値は未設定扱い）
pub fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    serde_json::from_str(&raw).ok()
}

/// JSONとして保存
pub fn set_json<T: Serialize + ?Sized>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// メモリ上のストア
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| crate::Error::Storage("memory store poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| crate::Error::Storage("memory store poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("a").is_none());

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_json_ignores_garbage() {
        let store = MemoryStore::new();
        store.set(LABELS_KEY, "{ not json").unwrap();
        let parsed: Option<HashMap<String, String>> = get_json(&store, LABELS_KEY);
        assert!(parsed.is_none());
    }

    #[test]
    fn test_rotations_key() {
        assert_eq!(rotations_key(42), "imageRotations:42");
    }
}
