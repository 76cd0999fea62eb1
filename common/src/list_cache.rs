//! 訪問一覧のセッションキャッシュ
//!
//! 5分以内ならそのまま使う。期限切れのキャッシュも即表示し、
//! 裏で再取得して差し替える（stale-while-revalidate）。

use crate::error::Result;
use crate::storage::{get_json, set_json, KvStore, VISITS_CACHE_KEY};
use crate::types::VisitSummary;
use serde::{Deserialize, Serialize};

/// キャッシュの有効期間（ミリ秒）
pub const LIST_CACHE_TTL_MS: i64 = 5 * 60 * 1000;

/// 保存形式
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedList {
    /// 保存時刻（UNIXミリ秒）
    timestamp: i64,
    data: Vec<VisitSummary>,
}

/// キャッシュ参照結果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// 期限内
    Fresh(Vec<VisitSummary>),
    /// 期限切れ（表示しつつ再取得）
    Stale(Vec<VisitSummary>),
    Missing,
}

impl CacheLookup {
    /// 表示に使える一覧
    pub fn visits(&self) -> Option<&[VisitSummary]> {
        match self {
            CacheLookup::Fresh(v) | CacheLookup::Stale(v) => Some(v),
            CacheLookup::Missing => None,
        }
    }

    /// 再取得が必要か
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, CacheLookup::Fresh(_))
    }
}

/// セッションストア上の一覧キャッシュ
pub struct ListCache<'a> {
    store: &'a dyn KvStore,
}

impl<'a> ListCache<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    pub fn lookup(&self, now_ms: i64) -> CacheLookup {
        let Some(cached) = get_json::<CachedList>(self.store, VISITS_CACHE_KEY) else {
            return CacheLookup::Missing;
        };
        if now_ms - cached.timestamp < LIST_CACHE_TTL_MS {
            CacheLookup::Fresh(cached.data)
        } else {
            CacheLookup::Stale(cached.data)
        }
    }

    pub fn store(&self, visits: &[VisitSummary], now_ms: i64) -> Result<()> {
        let cached = CachedList {
            timestamp: now_ms,
            data: visits.to_vec(),
        };
        set_json(self.store, VISITS_CACHE_KEY, &cached)
    }

    /// キャッシュの経過時間（ミリ秒）
    pub fn age_ms(&self, now_ms: i64) -> Option<i64> {
        get_json::<CachedList>(self.store, VISITS_CACHE_KEY).map(|c| now_ms - c.timestamp)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(VISITS_CACHE_KEY)
    }
}
