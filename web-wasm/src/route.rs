//! ハッシュルーティング
//!
//! - `#/visits`       一覧
//! - `#/visits/<id>`  詳細
//! - `#/login`        ログイン

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Visits,
    Visit(i64),
    Login,
    NotFound,
}

impl Route {
    pub fn parse(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [] | ["visits"] => Route::Visits,
            ["visits", id] => id.parse().map(Route::Visit).unwrap_or(Route::NotFound),
            ["login"] => Route::Login,
            _ => Route::NotFound,
        }
    }

    pub fn hash(&self) -> String {
        match self {
            Route::Visits | Route::NotFound => "#/visits".to_string(),
            Route::Visit(id) => format!("#/visits/{}", id),
            Route::Login => "#/login".to_string(),
        }
    }
}

/// 現在のハッシュ
pub fn current() -> Route {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|h| Route::parse(&h))
        .unwrap_or(Route::Visits)
}

/// 画面遷移（hashchangeで反映される）
pub fn navigate(route: Route) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(&route.hash());
    }
}
