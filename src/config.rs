use crate::cli::PdfQuality;
use crate::error::{AdminError, Result};
use heritage_common::DEFAULT_MEDIA_BASE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// コンテンツAPIのベースURL（画像の相対URLにも使う）
    pub base_url: String,
    /// 画像プロキシのURL（未設定なら base_url + /api/proxy-image）
    pub proxy_url: Option<String>,
    pub timeout_seconds: u64,
    pub pdf_quality: PdfQuality,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default_config()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdminError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("heritage-admin").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            base_url: DEFAULT_MEDIA_BASE.into(),
            proxy_url: None,
            timeout_seconds: 30,
            pdf_quality: PdfQuality::Medium,
        }
    }

    /// 環境変数を優先
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("HERITAGE_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url.trim().to_string();
            }
        }
        if let Ok(url) = std::env::var("HERITAGE_PROXY_URL") {
            if !url.trim().is_empty() {
                self.proxy_url = Some(url.trim().to_string());
            }
        }
    }

    pub fn proxy_url(&self) -> String {
        self.proxy_url.clone().unwrap_or_else(|| {
            format!("{}/api/proxy-image", self.base_url.trim_end_matches('/'))
        })
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AdminError::Config(format!("URLが不正です: {}", url)));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self.save()
    }
}
