//! ブラウザでのレポート出力
//!
//! 画像はプロキシ経由で取得してHTMLに埋め込み、`visit_<id>.html` としてダウンロードする。

use crate::api;
use heritage_common::export::html_core::render_html;
use heritage_common::export::{collect_images, export_file_name, plan_image_requests, ImageRequest};
use heritage_common::{DetailView, ExportDocument};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// ISO 8601 の時刻を "YYYY-MM-DD HH:MM UTC" にする
fn format_timestamp(iso: &str) -> String {
    let minutes: String = iso.chars().take(16).collect();
    format!("{} UTC", minutes.replace('T', " "))
}

fn timestamp() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    format_timestamp(&iso)
}

fn fetch_failure_message(name: &str, err: &str) -> String {
    format!("image {} failed: {}", name, err)
}

pub async fn build_document(view: &DetailView, token: &str) -> ExportDocument {
    let plans = plan_image_requests(view);
    let images = collect_images(&plans, |request: &ImageRequest| {
        let name = request.name.clone();
        let url = request.url.clone();
        let token = token.to_string();
        async move {
            let result = api::fetch_image(&url, &token).await;
            if let Err(e) = &result {
                web_sys::console::warn_1(&fetch_failure_message(&name, e).into());
            }
            result
        }
    })
    .await;
    ExportDocument::from_view(view, &timestamp()).with_images(images)
}

/// バイト列をファイルとしてダウンロードさせる
pub fn download(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), String> {
    let err = |e: wasm_bindgen::JsValue| format!("{:?}", e);

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(err)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("document is not available")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(err)?
        .dyn_into()
        .map_err(|_| "anchor element expected".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(err)?;
    Ok(())
}

/// 文書を作ってダウンロード。全体が完成してから保存する
pub async fn export_visit(view: &DetailView, token: &str) -> Result<String, String> {
    let doc = build_document(view, token).await;
    let html = render_html(&doc);
    let file_name = export_file_name(view.visit_id, "html");
    download(html.as_bytes(), &file_name, "text/html")?;
    Ok(file_name)
}

/// ブラウザの印刷ダイアログ
pub fn print() {
    if let Some(window) = web_sys::window() {
        let _ = window.print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_labelled_utc() {
        assert_eq!(
            format_timestamp("2026-10-19T08:30:12.000Z"),
            "2026-10-19 08:30 UTC"
        );
    }

    #[test]
    fn test_fetch_failure_message_keeps_reason() {
        assert_eq!(
            fetch_failure_message("Roof Photos 2", "Failed to fetch image"),
            "image Roof Photos 2 failed: Failed to fetch image"
        );
    }
}
