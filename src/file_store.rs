//! JSONファイルに保存するキーバリューストア
//!
//! - 永続ストア: ラベル・タイトル上書き、画像回転、トークン（ローカルデータディレクトリ）
//! - セッションストア: 一覧キャッシュ（キャッシュディレクトリ）

use crate::error::{AdminError, Result};
use heritage_common::KvStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

const APP_DIR: &str = "heritage-admin";
const PERSISTENT_FILE_NAME: &str = "store.json";
const SESSION_FILE_NAME: &str = "session.json";

/// 保存ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl StoreFile {
    const CURRENT_VERSION: u32 = 1;
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// ファイルを読み込む（無い・壊れている・バージョン違いは空）
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            entries: Mutex::new(Self::read(path).entries),
        }
    }

    pub fn persistent() -> Result<Self> {
        let dir = dirs::data_local_dir()
            .ok_or_else(|| AdminError::Config("データディレクトリが見つかりません".into()))?;
        Ok(Self::open(&dir.join(APP_DIR).join(PERSISTENT_FILE_NAME)))
    }

    pub fn session() -> Result<Self> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| AdminError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(Self::open(&dir.join(APP_DIR).join(SESSION_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> StoreFile {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return StoreFile::default(),
        };
        match serde_json::from_reader::<_, StoreFile>(BufReader::new(file)) {
            Ok(stored) if stored.version == StoreFile::CURRENT_VERSION => stored,
            Ok(_) => {
                warn!("ストアのバージョン不一致、空で開始します: {}", path.display());
                StoreFile::default()
            }
            Err(e) => {
                warn!("ストアの読み込みに失敗、空で開始します: {} ({})", path.display(), e);
                StoreFile::default()
            }
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> heritage_common::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoreFile {
            version: StoreFile::CURRENT_VERSION,
            entries: entries.clone(),
        };
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &stored)?;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> heritage_common::Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| heritage_common::Error::Storage("store lock poisoned".into()))?;
        apply(&mut entries);
        self.write(&entries)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> heritage_common::Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> heritage_common::Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("none.json"));
        assert!(store.get("token").is_none());
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("store.json");
        let store = FileStore::open(&path);
        store.set("token", "abc").unwrap();
        assert!(path.exists());
        assert_eq!(FileStore::open(&path).get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileStore::open(&path);
        assert!(store.get("anything").is_none());
        store.set("k", "v").unwrap();
        assert_eq!(FileStore::open(&path).get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path);
        store.set("token", "abc").unwrap();
        store.remove("token").unwrap();
        assert!(FileStore::open(&path).get("token").is_none());
    }
}
