//! ファイルストアの永続化テスト
//!
//! ラベル上書き・回転・一覧キャッシュが再読み込み後も残ることを検証

use heritage_admin::auth;
use heritage_admin::file_store::FileStore;
use heritage_common::{
    CacheLookup, LabelEditor, LabelKind, LabelOverrides, LabelTarget, ListCache, RotateDirection,
    RotationState, SummaryAttributes, VisitSummary, LIST_CACHE_TTL_MS,
};
use tempfile::tempdir;

#[test]
fn test_label_override_persists_across_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");

    {
        let store = FileStore::open(&path);
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        let mut titles = LabelOverrides::load(&store, LabelKind::Title);
        let mut editor = LabelEditor::default();
        editor.begin(LabelTarget::field("City"), "City");
        editor.input("Town");
        editor.commit(&store, &mut labels, &mut titles).expect("commit");
        assert_eq!(labels.display("City"), "Town");
    }

    let reloaded = FileStore::open(&path);
    let labels = LabelOverrides::load(&reloaded, LabelKind::Field);
    assert_eq!(labels.display("City"), "Town");
    assert_eq!(labels.display("District"), "District");
}

#[test]
fn test_cancelled_edit_is_not_saved() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path);
    let mut editor = LabelEditor::default();

    editor.begin(LabelTarget::title("Roof Photos"), "Roof Photos");
    editor.input("Roof");
    editor.cancel();

    let titles = LabelOverrides::load(&FileStore::open(&path), LabelKind::Title);
    assert_eq!(titles.display("Roof Photos"), "Roof Photos");
    assert!(store.path().ends_with("store.json"));
}

#[test]
fn test_rotation_persists_per_visit() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");

    {
        let store = FileStore::open(&path);
        let mut rotations = RotationState::load(&store, 12);
        rotations
            .rotate_and_save(&store, "Roof Photos", 1, RotateDirection::Left)
            .expect("save");
    }

    let store = FileStore::open(&path);
    assert_eq!(RotationState::load(&store, 12).angle("Roof Photos", 1), 270);
    assert_eq!(RotationState::load(&store, 13).angle("Roof Photos", 1), 0);
}

#[test]
fn test_list_cache_freshness_window() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = FileStore::open(&dir.path().join("session.json"));
    let cache = ListCache::new(&store);
    let visits = vec![VisitSummary {
        id: 1,
        attributes: SummaryAttributes::default(),
    }];

    assert_eq!(cache.lookup(0), CacheLookup::Missing);
    cache.store(&visits, 1_000).expect("store");
    assert_eq!(cache.lookup(1_000 + LIST_CACHE_TTL_MS - 1), CacheLookup::Fresh(visits.clone()));
    assert_eq!(cache.lookup(1_000 + LIST_CACHE_TTL_MS), CacheLookup::Stale(visits));
}

#[test]
fn test_token_login_logout_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("store.json");

    auth::login(&FileStore::open(&path), "abc").expect("login");
    assert_eq!(auth::require_token(&FileStore::open(&path)).unwrap(), "abc");

    auth::logout(&FileStore::open(&path)).expect("logout");
    assert!(auth::require_token(&FileStore::open(&path)).is_err());
}
