//! ラベル・セクションタイトルの上書き
//!
//! 既定ラベル → ユーザー入力の置換文字列。訪問レコードには依存しない
//! グローバルな設定で、上書き以外に削除手段はない。
//! 確定（Enter / フォーカス外れ）した時点で即座に保存する。

use crate::error::Result;
use crate::storage::{get_json, set_json, KvStore, LABELS_KEY, TITLES_KEY};
use std::collections::BTreeMap;

/// 上書き対象の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// フィールドラベル
    Field,
    /// セクションタイトル
    Title,
}

impl LabelKind {
    pub fn storage_key(&self) -> &'static str {
        match self {
            LabelKind::Field => LABELS_KEY,
            LabelKind::Title => TITLES_KEY,
        }
    }
}

/// 上書きマップ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelOverrides {
    kind: Option<LabelKind>,
    entries: BTreeMap<String, String>,
}

impl LabelOverrides {
    /// ストアから読み込み（未保存・破損時は空）
    pub fn load(store: &dyn KvStore, kind: LabelKind) -> Self {
        let entries = get_json(store, kind.storage_key()).unwrap_or_default();
        Self {
            kind: Some(kind),
            entries,
        }
    }

    /// 保存先を持たないマップ（プレビュー用）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 表示用テキスト（未設定・空なら既定値）
    pub fn display<'a>(&'a self, default_label: &'a str) -> &'a str {
        match self.entries.get(default_label) {
            Some(text) if !text.is_empty() => text,
            _ => default_label,
        }
    }

    pub fn get(&self, default_label: &str) -> Option<&str> {
        self.entries.get(default_label).map(String::as_str)
    }

    /// 上書きを設定して即保存
    ///
    /// 保存済みマップを読み直してからマージするので、
    /// 別インスタンスが先に保存した上書きは失われない。
    pub fn set(&mut self, store: &dyn KvStore, default_label: &str, text: &str) -> Result<()> {
        if let Some(kind) = self.kind {
            let mut stored: BTreeMap<String, String> =
                get_json(store, kind.storage_key()).unwrap_or_default();
            stored.insert(default_label.to_string(), text.to_string());
            set_json(store, kind.storage_key(), &stored)?;
            self.entries = stored;
        } else {
            self.entries
                .insert(default_label.to_string(), text.to_string());
        }
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 編集モード（ページ単位のビュー状態）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditMode {
    editing: bool,
}

impl EditMode {
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn toggle(&mut self) {
        self.editing = !self.editing;
    }

    /// トグルボタンの文言
    pub fn button_text(&self) -> &'static str {
        if self.editing {
            "Save Changes"
        } else {
            "Edit Labels"
        }
    }
}

/// 編集中のラベル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTarget {
    pub kind: LabelKind,
    pub default_label: String,
}

impl LabelTarget {
    pub fn field(default_label: &str) -> Self {
        Self {
            kind: LabelKind::Field,
            default_label: default_label.to_string(),
        }
    }

    pub fn title(default_label: &str) -> Self {
        Self {
            kind: LabelKind::Title,
            default_label: default_label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveEdit {
    target: LabelTarget,
    original: String,
    draft: String,
}

/// インライン編集の状態機械
///
/// begin → input* → commit | cancel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEditor {
    active: Option<ActiveEdit>,
}

impl LabelEditor {
    /// 編集開始（下書きは現在の表示テキスト）
    pub fn begin(&mut self, target: LabelTarget, current_text: &str) {
        self.active = Some(ActiveEdit {
            target,
            original: current_text.to_string(),
            draft: current_text.to_string(),
        });
    }

    pub fn input(&mut self, text: &str) {
        if let Some(active) = self.active.as_mut() {
            active.draft = text.to_string();
        }
    }

    pub fn draft(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.draft.as_str())
    }

    pub fn target(&self) -> Option<&LabelTarget> {
        self.active.as_ref().map(|a| &a.target)
    }

    pub fn is_editing(&self, target: &LabelTarget) -> bool {
        self.target() == Some(target)
    }

    /// 下書きが開始時のテキストのまま
    pub fn is_unchanged(&self) -> bool {
        self.active
            .as_ref()
            .map_or(true, |a| a.draft == a.original)
    }

    /// 確定して保存。編集中でなければ何もしない
    pub fn commit(
        &mut self,
        store: &dyn KvStore,
        labels: &mut LabelOverrides,
        titles: &mut LabelOverrides,
    ) -> Result<Option<LabelTarget>> {
        let Some(active) = self.active.take() else {
            return Ok(None);
        };
        let overrides = match active.target.kind {
            LabelKind::Field => labels,
            LabelKind::Title => titles,
        };
        overrides.set(store, &active.target.default_label, &active.draft)?;
        Ok(Some(active.target))
    }

    /// 取り消し（保存しない）
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_display_falls_back_to_default() {
        let store = MemoryStore::new();
        let labels = LabelOverrides::load(&store, LabelKind::Field);
        assert_eq!(labels.display("City"), "City");
    }

    #[test]
    fn test_override_survives_reload() {
        let store = MemoryStore::new();
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        labels.set(&store, "City", "Town").unwrap();

        let reloaded = LabelOverrides::load(&store, LabelKind::Field);
        assert_eq!(reloaded.display("City"), "Town");
    }

    #[test]
    fn test_empty_override_shows_default() {
        let store = MemoryStore::new();
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        labels.set(&store, "City", "").unwrap();
        assert_eq!(labels.display("City"), "City");
        assert_eq!(labels.get("City"), Some(""));
    }

    #[test]
    fn test_titles_and_labels_are_separate() {
        let store = MemoryStore::new();
        let mut titles = LabelOverrides::load(&store, LabelKind::Title);
        titles.set(&store, "Final Notes", "Closing Remarks").unwrap();

        let labels = LabelOverrides::load(&store, LabelKind::Field);
        assert_eq!(labels.display("Final Notes"), "Final Notes");
        assert!(store.get(TITLES_KEY).is_some());
        assert!(store.get(LABELS_KEY).is_none());
    }

    #[test]
    fn test_concurrent_instances_merge() {
        let store = MemoryStore::new();
        let mut a = LabelOverrides::load(&store, LabelKind::Field);
        let mut b = LabelOverrides::load(&store, LabelKind::Field);

        a.set(&store, "City", "Town").unwrap();
        b.set(&store, "Street", "Road").unwrap();

        let reloaded = LabelOverrides::load(&store, LabelKind::Field);
        assert_eq!(reloaded.display("City"), "Town");
        assert_eq!(reloaded.display("Street"), "Road");
    }

    #[test]
    fn test_editor_commit_applies_immediately() {
        let store = MemoryStore::new();
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        let mut titles = LabelOverrides::load(&store, LabelKind::Title);
        let mut editor = LabelEditor::default();

        let target = LabelTarget::field("City");
        editor.begin(target.clone(), labels.display("City"));
        assert!(editor.is_editing(&target));
        editor.input("Municipality");

        let committed = editor.commit(&store, &mut labels, &mut titles).unwrap();
        assert_eq!(committed, Some(target));
        assert_eq!(labels.display("City"), "Municipality");
        assert_eq!(
            LabelOverrides::load(&store, LabelKind::Field).display("City"),
            "Municipality"
        );
    }

    #[test]
    fn test_editor_unchanged_draft_is_cancelled() {
        let store = MemoryStore::new();
        let labels = LabelOverrides::load(&store, LabelKind::Field);
        let mut editor = LabelEditor::default();
        assert!(editor.is_unchanged());

        editor.begin(LabelTarget::field("City"), labels.display("City"));
        editor.input("City");
        assert!(editor.is_unchanged());
        editor.cancel();
        assert!(store.get(LABELS_KEY).is_none());

        editor.begin(LabelTarget::field("City"), labels.display("City"));
        editor.input("Town");
        assert!(!editor.is_unchanged());
    }

    #[test]
    fn test_editor_cancel_discards() {
        let store = MemoryStore::new();
        let mut labels = LabelOverrides::load(&store, LabelKind::Field);
        let mut titles = LabelOverrides::load(&store, LabelKind::Title);
        let mut editor = LabelEditor::default();

        editor.begin(LabelTarget::title("Safety Check Up"), "Safety Check Up");
        editor.input("Safety");
        editor.cancel();

        assert!(editor.commit(&store, &mut labels, &mut titles).unwrap().is_none());
        assert_eq!(titles.display("Safety Check Up"), "Safety Check Up");
        assert!(store.is_empty());
    }

    #[test]
    fn test_edit_mode_toggle() {
        let mut mode = EditMode::default();
        assert_eq!(mode.button_text(), "Edit Labels");
        mode.toggle();
        assert!(mode.is_editing());
        assert_eq!(mode.button_text(), "Save Changes");
    }
}
