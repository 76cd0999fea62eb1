//! PDFレポート生成（printpdf、A4・組み込みHelvetica）

use super::images::prepare_image;
use crate::cli::PdfQuality;
use crate::error::{AdminError, Result};
use heritage_common::export::pdf_core::{fit_into, max_chars_for, wrap_text, FlowCursor};
use heritage_common::export::{placeholder_text, ExportDocument, ExportImage, ExportImageSlot};
use heritage_common::layout::{
    line_height_mm, mm_to_pt, px_to_mm, A4_HEIGHT_MM, A4_WIDTH_MM, BODY_PT, COVER_TITLE_PT,
    IMAGE_BOX_HEIGHT_MM, IMAGE_BOX_WIDTH_MM, IMAGE_DPI, IMAGE_GAP_MM, LABEL_COLUMN_MM, MARGIN_MM,
    SECTION_TITLE_PT, USABLE_WIDTH_MM,
};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, RawImage, TextItem,
    XObjectTransform,
};
use tracing::{debug, warn};

const FONT: BuiltinFont = BuiltinFont::Helvetica;
const FONT_BOLD: BuiltinFont = BuiltinFont::HelveticaBold;

/// 列間の余白（mm）
const COLUMN_GAP_MM: f32 = 4.0;

/// 組み込みフォントで出せない文字を置き換える（Latin-1のみ）
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

struct PdfBuilder {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    cursor: FlowCursor,
    quality: PdfQuality,
}

impl PdfBuilder {
    fn new(title: &str, quality: PdfQuality) -> Self {
        Self {
            doc: PdfDocument::new(title),
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: FlowCursor::new(),
            quality,
        }
    }

    fn flush_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages
            .push(PdfPage::new(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), ops));
    }

    /// 高さを確保し、改ページが起きたらそれまでのページを確定
    fn reserve(&mut self, height_mm: f32) {
        if self.cursor.reserve(height_mm) {
            self.flush_page();
        }
    }

    fn text_at(&mut self, text: &str, x_mm: f32, y_mm: f32, size_pt: f32, font: BuiltinFont) {
        self.ops.extend([
            Op::StartTextSection,
            Op::SetTextCursor {
                pos: Point {
                    x: Pt(mm_to_pt(x_mm)),
                    y: Pt(mm_to_pt(y_mm)),
                },
            },
            Op::SetFontSizeBuiltinFont {
                size: Pt(size_pt),
                font,
            },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(pdf_safe(text))],
                font,
            },
            Op::EndTextSection,
        ]);
    }

    /// 全幅の見出し・本文（折り返しあり）
    fn paragraph(&mut self, text: &str, size_pt: f32, font: BuiltinFont) {
        let line_h = line_height_mm(size_pt);
        for line in wrap_text(text, max_chars_for(USABLE_WIDTH_MM, size_pt)) {
            self.reserve(line_h);
            let y = self.cursor.y_mm();
            self.text_at(&line, MARGIN_MM, y, size_pt, font);
        }
    }

    fn gap(&mut self, height_mm: f32) {
        self.reserve(height_mm);
    }

    /// ラベル: 値 の2列行
    fn field_row(&mut self, label: &str, value: &str) {
        let line_h = line_height_mm(BODY_PT);
        let value_width = USABLE_WIDTH_MM - LABEL_COLUMN_MM - COLUMN_GAP_MM;
        let label_lines = wrap_text(label, max_chars_for(LABEL_COLUMN_MM, BODY_PT));
        let value_lines = wrap_text(value, max_chars_for(value_width, BODY_PT));
        let rows = label_lines.len().max(value_lines.len());

        for i in 0..rows {
            self.reserve(line_h);
            let y = self.cursor.y_mm();
            if let Some(line) = label_lines.get(i) {
                self.text_at(line, MARGIN_MM, y, BODY_PT, FONT_BOLD);
            }
            if let Some(line) = value_lines.get(i) {
                let x = MARGIN_MM + LABEL_COLUMN_MM + COLUMN_GAP_MM;
                self.text_at(line, x, y, BODY_PT, FONT);
            }
        }
    }

    /// 画像を埋め込む。変換に失敗したらプレースホルダー行にする
    fn image(&mut self, image: &ExportImage) {
        let prepared = match prepare_image(&image.bytes, image.rotation, self.quality) {
            Ok(p) => p,
            Err(e) => {
                warn!("image {} could not be embedded: {}", image.name, e);
                self.paragraph(&placeholder_text(&image.name), BODY_PT, FONT);
                return;
            }
        };

        let mut warnings = Vec::new();
        let raw = match RawImage::decode_from_bytes(&prepared.jpeg, &mut warnings) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("image {} could not be embedded: {}", image.name, e);
                self.paragraph(&placeholder_text(&image.name), BODY_PT, FONT);
                return;
            }
        };

        let natural_w = px_to_mm(prepared.width);
        let natural_h = px_to_mm(prepared.height);
        let (w, h) = fit_into(natural_w, natural_h, IMAGE_BOX_WIDTH_MM, IMAGE_BOX_HEIGHT_MM);
        if w <= 0.0 {
            self.paragraph(&placeholder_text(&image.name), BODY_PT, FONT);
            return;
        }
        let scale = w / natural_w;

        self.reserve(h);
        let y = self.cursor.y_mm();
        let id = self.doc.add_image(&raw);
        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(mm_to_pt(MARGIN_MM))),
                translate_y: Some(Pt(mm_to_pt(y))),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        });

        self.paragraph(&image.name, BODY_PT, FONT);
        self.gap(IMAGE_GAP_MM);
    }

    fn finish(mut self) -> Vec<u8> {
        self.flush_page();
        let mut warnings = Vec::new();
        let bytes = self
            .doc
            .with_pages(self.pages)
            .save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!("pdf warnings: {}", warnings.len());
        }
        bytes
    }
}

/// 文書全体をPDFバイト列に変換
pub fn render_pdf(doc: &ExportDocument, quality: PdfQuality) -> Result<Vec<u8>> {
    let mut pdf = PdfBuilder::new(&format!("{} #{}", doc.title, doc.visit_id), quality);

    // 表紙
    pdf.paragraph(&doc.title, COVER_TITLE_PT, FONT_BOLD);
    for line in doc.cover_lines() {
        pdf.paragraph(&line, BODY_PT, FONT);
    }
    pdf.gap(IMAGE_GAP_MM);

    for section in &doc.sections {
        pdf.paragraph(&section.title, SECTION_TITLE_PT, FONT_BOLD);
        for field in &section.fields {
            pdf.field_row(&field.label, &field.value);
        }
        pdf.gap(IMAGE_GAP_MM / 2.0);
    }

    if !doc.image_sections.is_empty() {
        pdf.paragraph("Images", SECTION_TITLE_PT, FONT_BOLD);
    }
    for section in &doc.image_sections {
        pdf.paragraph(&section.title, SECTION_TITLE_PT, FONT_BOLD);
        for slot in &section.slots {
            match slot {
                ExportImageSlot::Embedded(image) => pdf.image(image),
                ExportImageSlot::Placeholder(text) => pdf.paragraph(text, BODY_PT, FONT),
            }
        }
    }

    let pages = pdf.cursor.page_count();
    let bytes = pdf.finish();
    if bytes.is_empty() {
        return Err(AdminError::Export("PDFの生成に失敗しました".into()));
    }
    debug!("pdf rendered: {} pages, {} bytes", pages, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heritage_common::export::{ExportField, ExportImageSection, ExportTextSection};

    fn doc() -> ExportDocument {
        ExportDocument {
            title: "Heritage Visit Report".to_string(),
            visit_id: 12,
            generated_at: "2024-05-01 10:00".to_string(),
            sections: vec![ExportTextSection {
                title: "Basic Information".to_string(),
                fields: (0..80)
                    .map(|i| ExportField {
                        label: format!("Field {}", i),
                        value: "N/A".to_string(),
                    })
                    .collect(),
            }],
            image_sections: Vec::new(),
        }
    }

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("Café"), "Café");
        assert_eq!(pdf_safe("神社"), "??");
    }

    #[test]
    fn test_text_only_pdf() {
        let bytes = render_pdf(&doc(), PdfQuality::Low).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_broken_image_does_not_abort() {
        let mut d = doc();
        d.image_sections = vec![ExportImageSection {
            title: "Roof Photos".to_string(),
            slots: vec![ExportImageSlot::Embedded(ExportImage {
                name: "Roof Photos 1".to_string(),
                mime: "image/jpeg".to_string(),
                bytes: b"garbage".to_vec(),
                rotation: 0,
            })],
        }];
        let bytes = render_pdf(&d, PdfQuality::Low).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
