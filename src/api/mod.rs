//! リモートコンテンツAPI
//!
//! - GET    /api/visits                               一覧
//! - GET    /api/visits/?filters[id]=<id>&populate=*  詳細
//! - PUT    /api/visits/:id  {data:{Confirmation}}    承認フラグ更新
//! - DELETE /api/visits/:id                           削除
//! - GET    <proxy>?url=<encoded>                     画像取得（Bearer認証）

mod client;

pub use client::HttpVisitApi;

use crate::error::Result;
use async_trait::async_trait;
use heritage_common::export::FetchedImage;
use heritage_common::{VisitDetail, VisitSummary};

/// 訪問APIの操作
#[async_trait]
pub trait VisitApi: Send + Sync {
    async fn list_visits(&self) -> Result<Vec<VisitSummary>>;

    /// 詳細取得。該当なしは None
    async fn get_visit(&self, id: i64) -> Result<Option<VisitDetail>>;

    /// 承認フラグを更新し、サーバーが返した更新後レコードを返す
    async fn set_confirmation(&self, id: i64, confirmed: bool) -> Result<VisitSummary>;

    async fn delete_visit(&self, id: i64) -> Result<()>;

    /// 画像プロキシ経由で画像を取得
    async fn fetch_image(&self, url: &str, token: &str) -> Result<FetchedImage>;
}
