//! レイアウト設定モジュール
//!
//! 訪問レポートPDFのmm基準レイアウト定義

// ============================================
// mm基準レイアウト（Source of Truth）
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白設定（mm）
pub const MARGIN_MM: f32 = 15.0;

/// 利用可能幅（mm）
pub const USABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 180mm

/// ラベル列の幅（mm）
pub const LABEL_COLUMN_MM: f32 = 70.0;

/// 画像枠（mm）
pub const IMAGE_BOX_WIDTH_MM: f32 = 120.0;
pub const IMAGE_BOX_HEIGHT_MM: f32 = 80.0;
pub const IMAGE_GAP_MM: f32 = 6.0;

// ============================================
// 文字サイズ（pt）
// ============================================

pub const COVER_TITLE_PT: f32 = 24.0;
pub const SECTION_TITLE_PT: f32 = 14.0;
pub const BODY_PT: f32 = 10.0;

/// 行送り係数（文字サイズ × 係数）
pub const LINE_HEIGHT_FACTOR: f32 = 1.4;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// PDFに埋め込む画像の解像度
pub const IMAGE_DPI: f32 = 150.0;

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// 行の高さ（mm）
#[inline]
pub fn line_height_mm(font_pt: f32) -> f32 {
    pt_to_mm(font_pt * LINE_HEIGHT_FACTOR)
}

/// ピクセル → mm（IMAGE_DPI基準）
#[inline]
pub fn px_to_mm(px: u32) -> f32 {
    px as f32 / IMAGE_DPI * 25.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        assert!((USABLE_WIDTH_MM - 180.0).abs() < 0.01);
        assert!(IMAGE_BOX_WIDTH_MM <= USABLE_WIDTH_MM);
        assert!(LABEL_COLUMN_MM < USABLE_WIDTH_MM);
    }

    #[test]
    fn test_conversion() {
        assert!((MM_TO_PT - 2.835).abs() < 0.01);
        assert!((mm_to_pt(10.0) - 28.35).abs() < 0.1);
        assert!((pt_to_mm(mm_to_pt(42.0)) - 42.0).abs() < 0.001);
    }

    #[test]
    fn test_px_to_mm() {
        // 150dpiで150px = 1inch
        assert!((px_to_mm(150) - 25.4).abs() < 0.001);
    }
}
