//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use heritage_admin::config::Config;
use heritage_admin::error::AdminError;

/// AdminErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        AdminError::Config("テスト設定エラー".to_string()),
        AdminError::LoginRequired,
        AdminError::NotFound(42),
        AdminError::Api {
            status: 500,
            message: "Failed to delete visit".to_string(),
        },
        AdminError::ImageDecode("bad header".to_string()),
        AdminError::Export("empty document".to_string()),
    ];

    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty(), "Error message should not be empty");
    }
}

#[test]
fn test_not_found_names_visit() {
    assert!(AdminError::NotFound(42).to_string().contains("#42"));
}

#[test]
fn test_api_error_shows_status() {
    let err = AdminError::Api {
        status: 404,
        message: "Failed to fetch visit".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("Failed to fetch visit"));
}

/// JSON解析エラーの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
    let err: AdminError = json_err.into();
    assert!(matches!(err, AdminError::JsonParse(_)));
}

/// 共通クレートのエラーは透過的に表示
#[test]
fn test_common_error_is_transparent() {
    let err: AdminError = heritage_common::Error::Storage("disk full".to_string()).into();
    assert_eq!(err.to_string(), "Storage error: disk full");
}

/// 不正なベースURL
#[test]
fn test_invalid_base_url_rejected() {
    let mut config = Config::default();
    let err = config.set_base_url("ftp://example.org".to_string()).unwrap_err();
    assert!(matches!(err, AdminError::Config(_)));
}
