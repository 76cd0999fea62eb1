//! エクスポートの統合テスト
//!
//! 画像プロキシ（wiremock）から取得してPDF/HTMLを生成する

use heritage_admin::api::HttpVisitApi;
use heritage_admin::cli::{ExportFormat, PdfQuality};
use heritage_admin::export::{build_document, export_visit, ExportOptions};
use heritage_common::export::ExportImageSlot;
use heritage_common::{
    render_detail, DetailView, LabelOverrides, MemoryStore, RenderContext,
    RotateDirection, RotationState, VisitDetail,
};
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::json;
use std::io::Cursor;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn png_bytes() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(60, 30, image::Rgb([200, 120, 40])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("png");
    buf.into_inner()
}

fn api(server: &MockServer) -> HttpVisitApi {
    HttpVisitApi::new(
        &server.uri(),
        &format!("{}/api/proxy-image", server.uri()),
        5,
    )
    .expect("client")
}

fn detail(attributes: serde_json::Value) -> VisitDetail {
    VisitDetail {
        id: 42,
        attributes: attributes.as_object().cloned().unwrap_or_default(),
    }
}

fn view_of(visit: &VisitDetail, rotations: &RotationState) -> DetailView {
    let labels = LabelOverrides::empty();
    let titles = LabelOverrides::empty();
    render_detail(
        visit,
        &RenderContext {
            labels: &labels,
            titles: &titles,
            rotations,
            media_base: "https://heritage.top-wp.com",
        },
    )
}

#[tokio::test]
async fn test_zero_images_gives_text_only_document() {
    let server = MockServer::start().await;
    let visit = detail(json!({ "user": "amal", "roofPhotos": {"data": []} }));
    let view = view_of(&visit, &RotationState::new(42));

    let doc = build_document(&api(&server), &view, "token", "2024-05-01 10:00", false).await;

    assert!(doc.image_sections.is_empty());
    assert_eq!(doc.placeholder_count(), 0);
    assert!(!doc.sections.is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_failed_image_becomes_placeholder_and_export_continues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy-image"))
        .and(query_param("url", "https://heritage.top-wp.com/uploads/ok.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/proxy-image"))
        .and(query_param("url", "https://heritage.top-wp.com/uploads/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let visit = detail(json!({
        "roofPhotos": {"data": [
            {"id": 1, "attributes": {"url": "/uploads/ok.png"}},
            {"id": 2, "attributes": {"url": "/uploads/missing.png"}}
        ]}
    }));
    let view = view_of(&visit, &RotationState::new(42));

    let doc = build_document(&api(&server), &view, "token", "2024-05-01 10:00", false).await;

    assert_eq!(doc.image_sections.len(), 1);
    let slots = &doc.image_sections[0].slots;
    assert!(matches!(slots[0], ExportImageSlot::Embedded(_)));
    assert_eq!(
        slots[1],
        ExportImageSlot::Placeholder("[Image unavailable: Roof Photos 2]".to_string())
    );
}

#[tokio::test]
async fn test_at_most_three_images_per_gallery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy-image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .expect(3)
        .mount(&server)
        .await;

    let items: Vec<_> = (0..5)
        .map(|i| json!({"id": i, "attributes": {"url": format!("/uploads/{}.png", i)}}))
        .collect();
    let visit = detail(json!({ "exPhotos": {"data": items} }));
    let view = view_of(&visit, &RotationState::new(42));

    let doc = build_document(&api(&server), &view, "token", "now", false).await;

    assert_eq!(doc.image_sections[0].slots.len(), 3);
    assert_eq!(doc.embedded_count(), 3);
}

#[tokio::test]
async fn test_export_pdf_writes_named_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy-image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .mount(&server)
        .await;

    let store = MemoryStore::new();
    let mut rotations = RotationState::load(&store, 42);
    rotations.rotate("Roof Photos", 0, RotateDirection::Right);
    let visit = detail(json!({
        "user": "amal",
        "roofPhotos": {"data": [{"id": 1, "attributes": {"url": "/uploads/ok.png"}}]}
    }));
    let view = view_of(&visit, &rotations);
    assert_eq!(view.galleries().next().map(|g| g.images[0].rotation), Some(90));

    let dir = tempdir().expect("Failed to create temp dir");
    let options = ExportOptions {
        format: ExportFormat::Pdf,
        quality: PdfQuality::Low,
        output: dir.path().to_path_buf(),
        show_progress: false,
    };
    let written = export_visit(&api(&server), &view, "token", "2024-05-01 10:00", &options)
        .await
        .expect("export");

    assert_eq!(written, dir.path().join("visit_42.pdf"));
    let bytes = std::fs::read(&written).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_export_html_embeds_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/proxy-image"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .mount(&server)
        .await;

    let visit = detail(json!({
        "city": "Byblos",
        "roofPhotos": {"data": [{"id": 1, "attributes": {"url": "/uploads/ok.png"}}]}
    }));
    let view = view_of(&visit, &RotationState::new(42));

    let dir = tempdir().expect("Failed to create temp dir");
    let options = ExportOptions {
        format: ExportFormat::Html,
        quality: PdfQuality::Medium,
        output: dir.path().to_path_buf(),
        show_progress: false,
    };
    let written = export_visit(&api(&server), &view, "token", "now", &options)
        .await
        .expect("export");

    assert_eq!(written, dir.path().join("visit_42.html"));
    let html = std::fs::read_to_string(&written).unwrap();
    assert!(html.contains("Heritage Visit Report"));
    assert!(html.contains("Byblos"));
    assert!(html.contains("data:image/png;base64,"));
}
