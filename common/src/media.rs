//! 画像URLの解決

use crate::types::MediaReference;

/// 画像配信元のデフォルトホスト
pub const DEFAULT_MEDIA_BASE: &str = "https://heritage.top-wp.com";

/// 絶対URLか
pub fn is_absolute_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// 相対URLにベースホストを付与
pub fn absolutize(base: &str, url: &str) -> String {
    if is_absolute_url(url) {
        return url.to_string();
    }
    let base = base.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// 画像参照を絶対URLへ（smallフォーマット優先）
pub fn resolve_media_url(base: &str, media: &MediaReference) -> Option<String> {
    media.preferred_url().map(|url| absolutize(base, url))
}
