//! エクスポート文書モデル
//!
//! 表紙（タイトル・訪問ID・生成日時）+ 情報セクション + 画像セクション。
//! 画像はギャラリーごとに先頭3枚まで、順番に取得する。
//! 1枚の取得失敗はプレースホルダ行に置き換えて続行する。

use crate::detail::DetailView;
use std::fmt::Display;
use std::future::Future;

/// 表紙タイトル
pub const REPORT_TITLE: &str = "Heritage Visit Report";

/// ギャラリーあたりの最大埋め込み枚数
pub const MAX_IMAGES_PER_SECTION: usize = 3;

/// ダウンロードファイル名: visit_<id>.<ext>
pub fn export_file_name(visit_id: i64, extension: &str) -> String {
    format!("visit_{}.{}", visit_id, extension)
}

/// 取得失敗時のプレースホルダ
pub fn placeholder_text(image_name: &str) -> String {
    format!("[Image unavailable: {}]", image_name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTextSection {
    pub title: String,
    pub fields: Vec<ExportField>,
}

/// 取得済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// 埋め込み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportImage {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// 表示回転（0/90/180/270）
    pub rotation: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportImageSlot {
    Embedded(ExportImage),
    /// 取得失敗（表示テキスト）
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportImageSection {
    pub title: String,
    pub slots: Vec<ExportImageSlot>,
}

/// 1枚分の取得要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// "<タイトル> <番号>"
    pub name: String,
    pub url: String,
    pub rotation: u16,
}

/// ギャラリー1つ分の取得計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSectionPlan {
    pub title: String,
    pub requests: Vec<ImageRequest>,
}

/// 表示中のギャラリーから取得計画を作る（各先頭3枚）
pub fn plan_image_requests(view: &DetailView) -> Vec<ImageSectionPlan> {
    view.galleries()
        .filter(|g| !g.images.is_empty())
        .map(|g| ImageSectionPlan {
            title: g.title.clone(),
            requests: g
                .images
                .iter()
                .take(MAX_IMAGES_PER_SECTION)
                .map(|img| ImageRequest {
                    name: format!("{} {}", g.title, img.index + 1),
                    url: img.url.clone(),
                    rotation: img.rotation,
                })
                .collect(),
        })
        .collect()
}

/// 計画に従って画像を順番に取得
///
/// `fetch` の失敗はその1枚だけプレースホルダにする。
pub async fn collect_images<F, Fut, E>(
    plans: &[ImageSectionPlan],
    mut fetch: F,
) -> Vec<ExportImageSection>
where
    F: FnMut(&ImageRequest) -> Fut,
    Fut: Future<Output = Result<FetchedImage, E>>,
    E: Display,
{
    let mut sections = Vec::with_capacity(plans.len());
    for plan in plans {
        let mut slots = Vec::with_capacity(plan.requests.len());
        for request in &plan.requests {
            let slot = match fetch(request).await {
                Ok(image) => ExportImageSlot::Embedded(ExportImage {
                    name: request.name.clone(),
                    mime: image.mime,
                    bytes: image.bytes,
                    rotation: request.rotation,
                }),
                Err(_) => ExportImageSlot::Placeholder(placeholder_text(&request.name)),
            };
            slots.push(slot);
        }
        sections.push(ExportImageSection {
            title: plan.title.clone(),
            slots,
        });
    }
    sections
}

/// エクスポート文書
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub visit_id: i64,
    pub generated_at: String,
    pub sections: Vec<ExportTextSection>,
    pub image_sections: Vec<ExportImageSection>,
}

impl ExportDocument {
    /// 表示中のビューから本文を構築（画像なし）
    pub fn from_view(view: &DetailView, generated_at: &str) -> Self {
        let sections = view
            .info_blocks()
            .map(|block| ExportTextSection {
                title: block.title.clone(),
                fields: block
                    .rows
                    .iter()
                    .map(|row| ExportField {
                        label: row.label.clone(),
                        value: row.value.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            visit_id: view.visit_id,
            generated_at: generated_at.to_string(),
            sections,
            image_sections: Vec::new(),
        }
    }

    pub fn with_images(mut self, image_sections: Vec<ExportImageSection>) -> Self {
        self.image_sections = image_sections;
        self
    }

    /// 表紙のサブタイトル行
    pub fn cover_lines(&self) -> Vec<String> {
        vec![
            format!("Visit ID: {}", self.visit_id),
            format!("Generated: {}", self.generated_at),
        ]
    }

    pub fn embedded_count(&self) -> usize {
        self.slots()
            .filter(|s| matches!(s, ExportImageSlot::Embedded(_)))
            .count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots()
            .filter(|s| matches!(s, ExportImageSlot::Placeholder(_)))
            .count()
    }

    fn slots(&self) -> impl Iterator<Item = &ExportImageSlot> {
        self.image_sections.iter().flat_map(|s| s.slots.iter())
    }
}
