//! 訪問一覧の取得（セッションキャッシュ経由）
//!
//! 表示用は期限切れのキャッシュもそのまま返し、裏で再取得する。
//! 行操作の土台には期限内のキャッシュか最新の一覧だけを使う。

use crate::api::VisitApi;
use crate::error::Result;
use heritage_common::{CacheLookup, KvStore, ListCache, VisitSummary};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// 裏で走っている一覧の再取得
pub type PendingRefresh = JoinHandle<Result<Vec<VisitSummary>>>;

/// 表示用の一覧。期限切れなら再取得のハンドルも返す
pub async fn load_for_display(
    api: Arc<dyn VisitApi>,
    session: &dyn KvStore,
    refresh: bool,
    now_ms: i64,
) -> Result<(Vec<VisitSummary>, Option<PendingRefresh>)> {
    let cache = ListCache::new(session);
    if !refresh {
        match cache.lookup(now_ms) {
            CacheLookup::Fresh(visits) => {
                debug!("list cache fresh ({} visits)", visits.len());
                return Ok((visits, None));
            }
            CacheLookup::Stale(visits) => {
                debug!("list cache stale, refreshing in background");
                let handle = tokio::spawn(async move { api.list_visits().await });
                return Ok((visits, Some(handle)));
            }
            CacheLookup::Missing => {}
        }
    }
    let visits = api.list_visits().await?;
    cache.store(&visits, now_ms)?;
    Ok((visits, None))
}

/// 行操作の土台になる一覧
///
/// 操作後の一覧は現在時刻で保存されるので、期限切れのキャッシュは使わない。
pub async fn load_for_mutation(
    api: &dyn VisitApi,
    session: &dyn KvStore,
    now_ms: i64,
) -> Result<Vec<VisitSummary>> {
    let cache = ListCache::new(session);
    if let CacheLookup::Fresh(visits) = cache.lookup(now_ms) {
        return Ok(visits);
    }
    debug!("list cache not fresh, fetching before mutation");
    let visits = api.list_visits().await?;
    cache.store(&visits, now_ms)?;
    Ok(visits)
}
