//! 一覧の検索・ページング
//!
//! - 検索は大文字小文字を無視した部分一致（id / user / plotNumber / visitdate / createdAt）
//! - 並び順はAPIの返した順のまま
//! - 1ページ10件、検索語を変えると1ページ目に戻る

use crate::types::VisitSummary;

/// 1ページあたりの件数
pub const PAGE_SIZE: usize = 10;

/// 検索語に一致するか
pub fn matches_query(visit: &VisitSummary, query: &str) -> bool {
    let q = query.to_lowercase();
    if q.is_empty() {
        return true;
    }
    visit.id.to_string().contains(&q)
        || visit.user().to_lowercase().contains(&q)
        || visit.plot_number().to_lowercase().contains(&q)
        || visit.visit_date().to_lowercase().contains(&q)
        || visit.created_at().to_lowercase().contains(&q)
}

/// 検索語で絞り込み（順序は保持）
pub fn filter_visits<'a>(visits: &'a [VisitSummary], query: &str) -> Vec<&'a VisitSummary> {
    visits.iter().filter(|v| matches_query(v, query)).collect()
}

/// 総ページ数 = ceil(n / PAGE_SIZE)
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// ページ送り状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    total_pages: usize,
}

impl Pager {
    pub fn new(item_count: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages(item_count),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// 件数変更（削除後など）。現在ページは範囲内に収める
    pub fn set_item_count(&mut self, item_count: usize) {
        self.total_pages = total_pages(item_count);
        self.current_page = self.current_page.min(self.total_pages).max(1);
    }

    /// ページ操作を表示するか（1ページ以下なら非表示）
    pub fn controls_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// 「最初」「前」が無効か
    pub fn at_first(&self) -> bool {
        self.current_page == 1
    }

    /// 「次」「最後」が無効か
    pub fn at_last(&self) -> bool {
        self.current_page >= self.total_pages
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    pub fn prev(&mut self) {
        if !self.at_first() {
            self.current_page -= 1;
        }
    }

    pub fn next(&mut self) {
        if !self.at_last() {
            self.current_page += 1;
        }
    }

    pub fn last(&mut self) {
        self.current_page = self.total_pages.max(1);
    }

    /// 指定ページへ（範囲外は丸める）
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages.max(1));
    }

    /// 番号ボタンの表示範囲（現在ページの前後、最大3つ）
    pub fn page_window(&self) -> std::ops::RangeInclusive<usize> {
        let start = self.current_page.saturating_sub(1).max(1);
        let end = self.total_pages.min(start + 2);
        start..=end
    }

    /// 現在ページの行範囲
    pub fn row_range(&self, item_count: usize) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * PAGE_SIZE).min(item_count);
        let end = (start + PAGE_SIZE).min(item_count);
        start..end
    }
}

/// 一覧画面の表示状態（検索語 + ページ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    query: String,
    pager: Pager,
}

impl ListView {
    pub fn new(visits: &[VisitSummary]) -> Self {
        Self {
            query: String::new(),
            pager: Pager::new(visits.len()),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// 検索語を変更して1ページ目に戻す
    pub fn set_query(&mut self, visits: &[VisitSummary], query: &str) {
        self.query = query.to_string();
        self.pager = Pager::new(filter_visits(visits, &self.query).len());
    }

    /// レコード増減後にページ数を再計算
    pub fn refresh(&mut self, visits: &[VisitSummary]) {
        let count = filter_visits(visits, &self.query).len();
        self.pager.set_item_count(count);
    }

    /// 現在ページの行
    pub fn rows<'a>(&self, visits: &'a [VisitSummary]) -> Vec<&'a VisitSummary> {
        let filtered = filter_visits(visits, &self.query);
        let range = self.pager.row_range(filtered.len());
        filtered[range].to_vec()
    }
}
