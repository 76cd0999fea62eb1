//! Heritage Visit Admin Common Library
//!
//! CLIとWeb(WASM)で共有される型とビューロジック

pub mod types;
pub mod error;
pub mod storage;
pub mod filter;
pub mod media;
pub mod labels;
pub mod rotation;
pub mod list_cache;
pub mod records;
pub mod sections;
pub mod detail;
pub mod layout;
pub mod export;

pub use types::{Entity, Envelope, MediaCollection, MediaReference, SummaryAttributes, VisitDetail, VisitSummary};
pub use error::{Error, Result};
pub use storage::{KvStore, MemoryStore};
pub use filter::{filter_visits, ListView, Pager, PAGE_SIZE};
pub use media::{resolve_media_url, DEFAULT_MEDIA_BASE};
pub use labels::{EditMode, LabelEditor, LabelKind, LabelOverrides, LabelTarget};
pub use rotation::{RotateDirection, RotationState};
pub use list_cache::{CacheLookup, ListCache, LIST_CACHE_TTL_MS};
pub use detail::{render_detail, DetailBlock, DetailView, RenderContext, EMPTY_VALUE};
pub use export::ExportDocument;
