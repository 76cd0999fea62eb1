//! HTML export core (used by the browser download and `--format html`).
//!
//! 画像はdata URLとして埋め込むので単一ファイルで完結する。

use super::document::{ExportDocument, ExportImageSlot};
use base64::{engine::general_purpose::STANDARD, Engine as _};

const STYLE: &str = r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 960px;
            margin: 0 auto;
            padding: 24px;
            color: #2c3e50;
        }
        .cover { border-bottom: 2px solid #2c3e50; margin-bottom: 24px; }
        .cover p { color: #6c757d; margin: 4px 0; }
        h2 { font-size: 18px; margin-top: 28px; }
        table { width: 100%; border-collapse: collapse; }
        td { border: 1px solid #dee2e6; padding: 6px 8px; vertical-align: top; }
        td.label { width: 40%; font-weight: 600; background: #f8f9fa; }
        .images { display: flex; flex-wrap: wrap; gap: 12px; }
        .images figure { margin: 0; width: 280px; }
        .images img { max-width: 100%; max-height: 220px; }
        .placeholder { color: #c0392b; font-style: italic; }
        @media print { .images figure { break-inside: avoid; } }
"#;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// data URL（"data:<mime>;base64,..."）
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// 文書をHTML文字列に変換
pub fn render_html(doc: &ExportDocument) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "    <title>{} #{}</title>\n    <style>{}</style>\n</head>\n<body>\n",
        html_escape(&doc.title),
        doc.visit_id,
        STYLE
    ));

    // 表紙
    html.push_str("<div class=\"cover\">\n");
    html.push_str(&format!("    <h1>{}</h1>\n", html_escape(&doc.title)));
    for line in doc.cover_lines() {
        html.push_str(&format!("    <p>{}</p>\n", html_escape(&line)));
    }
    html.push_str("</div>\n");

    for section in &doc.sections {
        html.push_str(&format!("<h2>{}</h2>\n<table>\n", html_escape(&section.title)));
        for field in &section.fields {
            html.push_str(&format!(
                "    <tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
                html_escape(&field.label),
                html_escape(&field.value)
            ));
        }
        html.push_str("</table>\n");
    }

    if !doc.image_sections.is_empty() {
        html.push_str("<h2>Images</h2>\n");
    }
    for section in &doc.image_sections {
        html.push_str(&format!(
            "<h3>{}</h3>\n<div class=\"images\">\n",
            html_escape(&section.title)
        ));
        for slot in &section.slots {
            match slot {
                ExportImageSlot::Embedded(image) => {
                    html.push_str(&format!(
                        "    <figure><img src=\"{}\" alt=\"{}\" style=\"transform: rotate({}deg)\"><figcaption>{}</figcaption></figure>\n",
                        data_url(&image.mime, &image.bytes),
                        html_escape(&image.name),
                        image.rotation,
                        html_escape(&image.name)
                    ));
                }
                ExportImageSlot::Placeholder(text) => {
                    html.push_str(&format!(
                        "    <p class=\"placeholder\">{}</p>\n",
                        html_escape(text)
                    ));
                }
            }
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::document::{
        ExportField, ExportImage, ExportImageSection, ExportTextSection,
    };

    fn doc() -> ExportDocument {
        ExportDocument {
            title: "Heritage Visit Report".to_string(),
            visit_id: 3,
            generated_at: "2024-05-01 10:00".to_string(),
            sections: vec![ExportTextSection {
                title: "Site Description".to_string(),
                fields: vec![ExportField {
                    label: "Owner's name".to_string(),
                    value: "<b>Abou & Sons</b>".to_string(),
                }],
            }],
            image_sections: Vec::new(),
        }
    }

    #[test]
    fn test_text_only_has_no_images_block() {
        let html = render_html(&doc());
        assert!(html.contains("<h1>Heritage Visit Report</h1>"));
        assert!(html.contains("Visit ID: 3"));
        assert!(!html.contains("<h2>Images</h2>"));
        assert!(!html.contains("placeholder\">"));
    }

    #[test]
    fn test_values_escaped() {
        let html = render_html(&doc());
        assert!(html.contains("Owner&#39;s name"));
        assert!(html.contains("&lt;b&gt;Abou &amp; Sons&lt;/b&gt;"));
    }

    #[test]
    fn test_images_and_placeholders() {
        let mut d = doc();
        d.image_sections.push(ExportImageSection {
            title: "Roof Photos".to_string(),
            slots: vec![
                ExportImageSlot::Embedded(ExportImage {
                    name: "Roof Photos 1".to_string(),
                    mime: "image/png".to_string(),
                    bytes: vec![0x89, 0x50],
                    rotation: 180,
                }),
                ExportImageSlot::Placeholder("[Image unavailable: Roof Photos 2]".to_string()),
            ],
        });

        let html = render_html(&d);
        assert!(html.contains("src=\"data:image/png;base64,iVA=\""));
        assert!(html.contains("rotate(180deg)"));
        assert!(html.contains("[Image unavailable: Roof Photos 2]"));
    }
}
