//! PDF埋め込み用の画像処理
//!
//! 回転 → 縮小 → JPEG再エンコード

use crate::cli::PdfQuality;
use crate::error::{AdminError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// 処理済み画像（JPEGバイト列とピクセルサイズ）
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// 表示回転（0/90/180/270）を画素に適用
pub fn apply_rotation(img: DynamicImage, rotation: u16) -> DynamicImage {
    match rotation {
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        _ => img,
    }
}

/// 最大幅を超える場合のみ縮小
pub fn limit_width(img: DynamicImage, max_width: u32) -> DynamicImage {
    if img.width() <= max_width {
        return img;
    }
    img.resize(max_width, u32::MAX, FilterType::Triangle)
}

pub fn prepare_image(bytes: &[u8], rotation: u16, quality: PdfQuality) -> Result<PreparedImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AdminError::ImageDecode(e.to_string()))?;
    let img = limit_width(apply_rotation(img, rotation), quality.max_width());
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, quality.jpeg_quality());
    rgb.write_with_encoder(encoder)
        .map_err(|e| AdminError::ImageDecode(e.to_string()))?;

    debug!(
        "prepared image {}x{} rot={} -> {} bytes",
        rgb.width(),
        rgb.height(),
        rotation,
        jpeg.len()
    );

    Ok(PreparedImage {
        jpeg,
        width: rgb.width(),
        height: rgb.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let prepared = prepare_image(&png(40, 20), 90, PdfQuality::High).unwrap();
        assert_eq!((prepared.width, prepared.height), (20, 40));

        let prepared = prepare_image(&png(40, 20), 180, PdfQuality::High).unwrap();
        assert_eq!((prepared.width, prepared.height), (40, 20));
    }

    #[test]
    fn test_resize_to_quality_width() {
        let prepared = prepare_image(&png(1000, 500), 0, PdfQuality::Low).unwrap();
        assert_eq!(prepared.width, 500);
        assert_eq!(prepared.height, 250);
    }

    #[test]
    fn test_output_is_jpeg() {
        let prepared = prepare_image(&png(10, 10), 0, PdfQuality::Medium).unwrap();
        assert_eq!(&prepared.jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = prepare_image(b"not an image", 0, PdfQuality::Medium).unwrap_err();
        assert!(matches!(err, AdminError::ImageDecode(_)));
    }
}
