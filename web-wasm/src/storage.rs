//! ブラウザストレージ（localStorage / sessionStorage）

use gloo::storage::{LocalStorage, SessionStorage, Storage};
use heritage_common::storage::TOKEN_KEY;
use heritage_common::{Error, KvStore, Result};

/// 保存先
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserStore {
    /// ラベル・タイトル・回転・トークン
    Local,
    /// 一覧キャッシュ
    Session,
}

impl BrowserStore {
    fn raw(&self) -> web_sys::Storage {
        match self {
            BrowserStore::Local => LocalStorage::raw(),
            BrowserStore::Session => SessionStorage::raw(),
        }
    }
}

fn storage_error(e: wasm_bindgen::JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.raw().set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.raw().remove_item(key).map_err(storage_error)
    }
}

/// 保存済みの認証トークン
pub fn token() -> Option<String> {
    BrowserStore::Local
        .get(TOKEN_KEY)
        .filter(|t| !t.trim().is_empty())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use heritage_common::{LabelKind, LabelOverrides, ListCache, CacheLookup};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_local_store_roundtrip() {
        let store = BrowserStore::Local;
        store.set("heritage-test", "v1").unwrap();
        assert_eq!(store.get("heritage-test").as_deref(), Some("v1"));
        store.remove("heritage-test").unwrap();
        assert!(store.get("heritage-test").is_none());
    }

    #[wasm_bindgen_test]
    fn wasm_blank_token_is_logged_out() {
        BrowserStore::Local.set(TOKEN_KEY, "   ").unwrap();
        assert!(token().is_none());
        BrowserStore::Local.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(token().as_deref(), Some("abc"));
        BrowserStore::Local.remove(TOKEN_KEY).unwrap();
    }

    #[wasm_bindgen_test]
    fn wasm_label_override_persists_in_local_storage() {
        let store = BrowserStore::Local;
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        labels.set(&store, "City", "Town").unwrap();
        assert_eq!(
            LabelOverrides::load(&store, LabelKind::Field).display("City"),
            "Town"
        );
        store.remove(LabelKind::Field.storage_key()).unwrap();
    }

    #[wasm_bindgen_test]
    fn wasm_list_cache_lives_in_session_storage() {
        let session = BrowserStore::Session;
        let cache = ListCache::new(&session);
        cache.store(&[], 1_000).unwrap();
        assert_eq!(cache.lookup(2_000), CacheLookup::Fresh(Vec::new()));
        assert_eq!(ListCache::new(&BrowserStore::Local).lookup(2_000), CacheLookup::Missing);
        cache.clear().unwrap();
    }
}
