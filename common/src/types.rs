//! 訪問レコードの型定義
//!
//! リモートAPI（Strapi互換）のレスポンスをそのまま受ける型:
//! - Envelope: `{ "data": ... }`
//! - Entity: `{ "id": ..., "attributes": {...} }`
//! - VisitSummary: 一覧ページの1行
//! - VisitDetail: 詳細ページの1件（属性はオープンなJSONオブジェクト）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// APIレスポンスの外側 `{ "data": T }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// `{ "id", "attributes" }` 形式のエンティティ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<A> {
    pub id: i64,
    pub attributes: A,
}

/// 一覧表示に使う属性
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryAttributes {
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub visitdate: Option<String>,

    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,

    #[serde(default, rename = "plotNumber")]
    pub plot_number: Option<String>,

    /// 管理者承認フラグ（nullは未承認扱い）
    #[serde(default, rename = "Confirmation")]
    pub confirmation: Option<bool>,
}

/// 訪問一覧の1行
pub type VisitSummary = Entity<SummaryAttributes>;

impl VisitSummary {
    pub fn user(&self) -> &str {
        self.attributes.user.as_deref().unwrap_or("")
    }

    pub fn visit_date(&self) -> &str {
        self.attributes.visitdate.as_deref().unwrap_or("")
    }

    pub fn created_at(&self) -> &str {
        self.attributes.created_at.as_deref().unwrap_or("")
    }

    pub fn plot_number(&self) -> &str {
        self.attributes.plot_number.as_deref().unwrap_or("")
    }

    pub fn confirmed(&self) -> bool {
        self.attributes.confirmation.unwrap_or(false)
    }
}

/// 画像フォーマット（`formats.small` など）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFormat {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaFormats {
    #[serde(default)]
    pub small: Option<MediaFormat>,
}

/// 画像アセットの属性
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaAttributes {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub formats: Option<MediaFormats>,
}

/// 画像参照
pub type MediaReference = Entity<MediaAttributes>;

impl MediaReference {
    /// 表示用URL（smallフォーマット優先、なければ元URL）
    pub fn preferred_url(&self) -> Option<&str> {
        self.attributes
            .formats
            .as_ref()
            .and_then(|f| f.small.as_ref())
            .and_then(|s| s.url.as_deref())
            .filter(|u| !u.is_empty())
            .or_else(|| self.attributes.url.as_deref().filter(|u| !u.is_empty()))
    }
}

/// メディアコレクション `{ "data": [...] | null }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaCollection {
    #[serde(default)]
    pub data: Option<Vec<MediaReference>>,
}

impl MediaCollection {
    pub fn items(&self) -> &[MediaReference] {
        self.data.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// 訪問詳細（約90フィールド + 約14メディアコレクション）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitDetail {
    pub id: i64,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl VisitDetail {
    /// フィールド値の表示文字列（未設定・空はNone）
    pub fn field(&self, key: &str) -> Option<String> {
        if key == "id" {
            return Some(self.id.to_string());
        }
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(true) => Some("Yes".to_string()),
            Value::Bool(false) => Some("No".to_string()),
            Value::Number(n) => Some(n.to_string()),
            // 配列やオブジェクトはフィールドとしては扱わない
            _ => None,
        }
    }

    /// メディアコレクション（形式不正・未設定は空扱い）
    pub fn media(&self, key: &str) -> MediaCollection {
        self.attributes
            .get(key)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_deserialize() {
        let json = r#"{
            "id": 7,
            "attributes": {
                "user": "Rana",
                "visitdate": "2024-03-01",
                "createdAt": "2024-03-02T10:00:00.000Z",
                "plotNumber": "1204",
                "Confirmation": true,
                "city": "Beirut"
            }
        }"#;

        let visit: VisitSummary = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(visit.id, 7);
        assert_eq!(visit.user(), "Rana");
        assert_eq!(visit.plot_number(), "1204");
        assert!(visit.confirmed());
    }

    #[test]
    fn test_summary_null_confirmation() {
        let json = r#"{"id": 3, "attributes": {"Confirmation": null}}"#;
        let visit: VisitSummary = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert!(!visit.confirmed());
        assert_eq!(visit.user(), "");
    }

    #[test]
    fn test_detail_field_rendering() {
        let detail = VisitDetail {
            id: 12,
            attributes: json!({
                "city": "Beirut",
                "street": "   ",
                "numberOfFloors": 3,
                "safeToEnter": false,
                "gas": null
            })
            .as_object()
            .cloned()
            .unwrap(),
        };

        assert_eq!(detail.field("id").as_deref(), Some("12"));
        assert_eq!(detail.field("city").as_deref(), Some("Beirut"));
        assert_eq!(detail.field("street"), None);
        assert_eq!(detail.field("numberOfFloors").as_deref(), Some("3"));
        assert_eq!(detail.field("safeToEnter").as_deref(), Some("No"));
        assert_eq!(detail.field("gas"), None);
        assert_eq!(detail.field("missing"), None);
    }

    #[test]
    fn test_detail_media() {
        let detail = VisitDetail {
            id: 1,
            attributes: json!({
                "exPhotos": {"data": [
                    {"id": 1, "attributes": {"url": "/uploads/a.jpg",
                        "formats": {"small": {"url": "/uploads/small_a.jpg"}}}},
                    {"id": 2, "attributes": {"url": "/uploads/b.jpg"}}
                ]},
                "roofPhotos": {"data": null},
                "broken": "not a collection"
            })
            .as_object()
            .cloned()
            .unwrap(),
        };

        let photos = detail.media("exPhotos");
        assert_eq!(photos.items().len(), 2);
        assert_eq!(photos.items()[0].preferred_url(), Some("/uploads/small_a.jpg"));
        assert_eq!(photos.items()[1].preferred_url(), Some("/uploads/b.jpg"));

        assert!(detail.media("roofPhotos").is_empty());
        assert!(detail.media("broken").is_empty());
        assert!(detail.media("absent").is_empty());
    }
}
