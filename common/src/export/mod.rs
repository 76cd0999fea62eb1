//! Export core modules shared across CLI and WASM wrappers.

pub mod document;
pub mod html_core;
pub mod pdf_core;

pub use document::{
    collect_images, export_file_name, placeholder_text, plan_image_requests, ExportDocument,
    ExportField, ExportImage, ExportImageSection, ExportImageSlot, ExportTextSection,
    FetchedImage, ImageRequest, ImageSectionPlan, MAX_IMAGES_PER_SECTION, REPORT_TITLE,
};
