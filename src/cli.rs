use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "heritage-admin")]
#[command(about = "文化遺産サイト訪問記録の管理・レポート出力ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 訪問一覧を表示（検索・ページ送り）
    List {
        /// 検索語（ID/ユーザー/区画番号/日付の部分一致）
        #[arg(short, long, default_value = "")]
        search: String,

        /// ページ番号（1始まり）
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// キャッシュを使わず再取得
        #[arg(long)]
        refresh: bool,
    },

    /// 訪問詳細を表示
    Show {
        /// 訪問ID
        id: i64,

        /// ラベル・タイトルを対話的に編集
        #[arg(long)]
        edit_labels: bool,
    },

    /// 印刷用テキストを出力
    Print {
        /// 訪問ID
        id: i64,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 訪問記録を削除
    Delete {
        /// 訪問ID
        id: i64,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 承認フラグを設定
    Confirm {
        /// 訪問ID
        id: i64,

        /// 承認を取り消す
        #[arg(long)]
        unset: bool,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },

    /// 訪問レポートを出力
    Export {
        /// 訪問ID
        id: i64,

        /// 出力ディレクトリ（ファイル名は visit_<id>.<ext>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (pdf/html)
        #[arg(short, long, default_value = "pdf")]
        format: ExportFormat,

        /// PDF画像品質 (high/medium/low)
        #[arg(long)]
        pdf_quality: Option<PdfQuality>,
    },

    /// 画像の表示回転（90°単位）
    Rotate {
        /// 訪問ID
        id: i64,

        /// ギャラリーの既定タイトル（例: "Roof Photos"）
        section: String,

        /// 画像番号（1始まり）
        index: usize,

        /// 反時計回り
        #[arg(long)]
        left: bool,
    },

    /// フィールドラベルの上書き
    Labels {
        #[command(subcommand)]
        action: OverrideAction,
    },

    /// セクションタイトルの上書き
    Titles {
        #[command(subcommand)]
        action: OverrideAction,
    },

    /// 認証トークンを保存
    Login {
        /// Bearerトークン
        #[arg(long)]
        token: String,
    },

    /// 認証トークンを削除
    Logout,

    /// 一覧キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum OverrideAction {
    /// 上書き一覧（--all で既定値も表示）
    List {
        #[arg(long)]
        all: bool,
    },
    /// 上書きを設定
    Set {
        /// 既定のラベル/タイトル
        default: String,
        /// 表示テキスト
        text: String,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(format!("Unknown format: {}. Use pdf or html", s)),
        }
    }
}

/// PDF画像品質設定
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfQuality {
    /// 高品質: 1400px, 85%
    High,
    /// 中品質: 800px, 75%（デフォルト）
    #[default]
    Medium,
    /// 低品質: 500px, 60%
    Low,
}

impl PdfQuality {
    /// 最大ピクセル幅
    pub fn max_width(&self) -> u32 {
        match self {
            PdfQuality::High => 1400,
            PdfQuality::Medium => 800,
            PdfQuality::Low => 500,
        }
    }

    /// JPEG品質 (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PdfQuality::High => 85,
            PdfQuality::Medium => 75,
            PdfQuality::Low => 60,
        }
    }
}

impl std::str::FromStr for PdfQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" | "h" => Ok(PdfQuality::High),
            "medium" | "med" | "m" => Ok(PdfQuality::Medium),
            "low" | "l" => Ok(PdfQuality::Low),
            _ => Err(format!("Unknown quality: {}. Use high, medium, or low", s)),
        }
    }
}

impl std::fmt::Display for PdfQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PdfQuality::High => write!(f, "high"),
            PdfQuality::Medium => write!(f, "medium"),
            PdfQuality::Low => write!(f, "low"),
        }
    }
}
