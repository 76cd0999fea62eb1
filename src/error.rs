use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ログインが必要です。`heritage-admin login --token YOUR_TOKEN` でトークンを設定してください")]
    LoginRequired,

    #[error("訪問記録が見つかりません: #{0}")]
    NotFound(i64),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("APIエラー ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("画像処理エラー: {0}")]
    ImageDecode(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("エクスポートエラー: {0}")]
    Export(String),

    #[error(transparent)]
    Common(#[from] heritage_common::Error),
}

pub type Result<T> = std::result::Result<T, AdminError>;
