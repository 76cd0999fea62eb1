//! 詳細画面のビューモデル構築
//!
//! VisitDetail + ラベル上書き + 回転状態 → 表示ブロックの列。
//! 空のギャラリーはブロック自体を出さない。

use crate::labels::LabelOverrides;
use crate::media::resolve_media_url;
use crate::rotation::{css_transform, RotationState};
use crate::sections::{GalleryDef, InfoSectionDef, SectionDef, DETAIL_LAYOUT};
use crate::types::VisitDetail;

/// 未入力時の表示
pub const EMPTY_VALUE: &str = "N/A";

/// 情報欄の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub default_label: &'static str,
    pub label: String,
    pub value: String,
}

impl InfoRow {
    pub fn is_empty(&self) -> bool {
        self.value == EMPTY_VALUE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock {
    pub default_title: &'static str,
    pub title: String,
    pub rows: Vec<InfoRow>,
}

/// ギャラリー内の1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub index: usize,
    pub url: String,
    pub alt: String,
    pub rotation: u16,
}

impl GalleryImage {
    pub fn transform(&self) -> String {
        css_transform(self.rotation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryBlock {
    pub default_title: &'static str,
    /// メディアコレクションの属性キー
    pub key: &'static str,
    pub title: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailBlock {
    Info(InfoBlock),
    Gallery(GalleryBlock),
}

/// 詳細画面全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub visit_id: i64,
    pub blocks: Vec<DetailBlock>,
}

impl DetailView {
    pub fn info_blocks(&self) -> impl Iterator<Item = &InfoBlock> {
        self.blocks.iter().filter_map(|b| match b {
            DetailBlock::Info(info) => Some(info),
            DetailBlock::Gallery(_) => None,
        })
    }

    pub fn galleries(&self) -> impl Iterator<Item = &GalleryBlock> {
        self.blocks.iter().filter_map(|b| match b {
            DetailBlock::Gallery(g) => Some(g),
            DetailBlock::Info(_) => None,
        })
    }

    pub fn image_count(&self) -> usize {
        self.galleries().map(|g| g.images.len()).sum()
    }
}

/// 表示に必要な上書き情報
pub struct RenderContext<'a> {
    pub labels: &'a LabelOverrides,
    pub titles: &'a LabelOverrides,
    pub rotations: &'a RotationState,
    pub media_base: &'a str,
}

/// 詳細ビューを構築
pub fn render_detail(visit: &VisitDetail, ctx: &RenderContext<'_>) -> DetailView {
    let blocks = DETAIL_LAYOUT
        .iter()
        .filter_map(|section| match section {
            SectionDef::Info(def) => Some(DetailBlock::Info(render_info(visit, def, ctx))),
            SectionDef::Gallery(def) => render_gallery(visit, def, ctx).map(DetailBlock::Gallery),
        })
        .collect();

    DetailView {
        visit_id: visit.id,
        blocks,
    }
}

fn render_info(visit: &VisitDetail, def: &InfoSectionDef, ctx: &RenderContext<'_>) -> InfoBlock {
    let rows = def
        .fields
        .iter()
        .map(|f| InfoRow {
            default_label: f.label,
            label: ctx.labels.display(f.label).to_string(),
            value: visit.field(f.key).unwrap_or_else(|| EMPTY_VALUE.to_string()),
        })
        .collect();

    InfoBlock {
        default_title: def.title,
        title: ctx.titles.display(def.title).to_string(),
        rows,
    }
}

fn render_gallery(
    visit: &VisitDetail,
    def: &GalleryDef,
    ctx: &RenderContext<'_>,
) -> Option<GalleryBlock> {
    let collection = visit.media(def.key);
    let title = ctx.titles.display(def.title).to_string();

    let images: Vec<GalleryImage> = collection
        .items()
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let url = resolve_media_url(ctx.media_base, item)?;
            Some(GalleryImage {
                index,
                url,
                alt: format!("{} {}", title, index + 1),
                // 回転は既定タイトル基準で保存（タイトル変更で失われない）
                rotation: ctx.rotations.angle(def.title, index),
            })
        })
        .collect();

    if images.is_empty() {
        return None;
    }

    Some(GalleryBlock {
        default_title: def.title,
        key: def.key,
        title,
        images,
    })
}
