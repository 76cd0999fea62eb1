//! 訪問レポートのエクスポート
//!
//! 画像はプロキシ経由で1件ずつ取得し（各ギャラリー最大3枚）、
//! 失敗した画像はプレースホルダーに置き換えて続行する。
//! ファイルは文書全体の生成に成功した後にだけ書き出す。

pub mod images;
pub mod pdf;

use crate::api::VisitApi;
use crate::cli::{ExportFormat, PdfQuality};
use crate::error::Result;
use heritage_common::export::html_core::render_html;
use heritage_common::export::{
    collect_images, export_file_name, plan_image_requests, ExportDocument, ImageRequest,
};
use heritage_common::DetailView;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible || total == 0 {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("  画像取得 [{bar:30}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// 詳細ビューから文書を組み立てる（画像取得を含む）
pub async fn build_document(
    api: &dyn VisitApi,
    view: &DetailView,
    token: &str,
    generated_at: &str,
    show_progress: bool,
) -> ExportDocument {
    let plans = plan_image_requests(view);
    let total: usize = plans.iter().map(|p| p.requests.len()).sum();
    let pb = progress_bar(total, show_progress);

    let image_sections = collect_images(&plans, |request: &ImageRequest| {
        let pb = pb.clone();
        let name = request.name.clone();
        let url = request.url.clone();
        async move {
            pb.set_message(name.clone());
            let result = api.fetch_image(&url, token).await;
            if let Err(e) = &result {
                warn!("image {} failed: {}", name, e);
            }
            pb.inc(1);
            result
        }
    })
    .await;
    pb.finish_and_clear();

    let doc = ExportDocument::from_view(view, generated_at).with_images(image_sections);
    info!(
        "document built: {} sections, {} images, {} placeholders",
        doc.sections.len(),
        doc.embedded_count(),
        doc.placeholder_count()
    );
    doc
}

/// 文書を指定形式のバイト列にする
pub fn render(doc: &ExportDocument, format: ExportFormat, quality: PdfQuality) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Pdf => pdf::render_pdf(doc, quality),
        ExportFormat::Html => Ok(render_html(doc).into_bytes()),
    }
}

/// 出力先: ディレクトリなら visit_<id>.<ext>、拡張子付きならそのまま
pub fn output_path_for(output: &Path, visit_id: i64, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(visit_id, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// 生成済みのバイト列を書き出す
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// エクスポート設定
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub quality: PdfQuality,
    pub output: PathBuf,
    pub show_progress: bool,
}

/// 取得 → 生成 → 書き出し
pub async fn export_visit(
    api: &dyn VisitApi,
    view: &DetailView,
    token: &str,
    generated_at: &str,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let doc = build_document(api, view, token, generated_at, options.show_progress).await;
    let bytes = render(&doc, options.format, options.quality)?;
    let path = output_path_for(&options.output, view.visit_id, options.format);
    write_output(&path, &bytes)?;
    info!("exported visit #{} to {}", view.visit_id, path.display());
    Ok(path)
}
