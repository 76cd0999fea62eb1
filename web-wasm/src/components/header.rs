//! ヘッダーコンポーネント

use crate::route::{navigate, Route};
use crate::storage::{token, BrowserStore};
use heritage_common::storage::TOKEN_KEY;
use heritage_common::KvStore;
use leptos::prelude::*;

#[component]
pub fn Header(route: ReadSignal<Route>) -> impl IntoView {
    // ページ遷移のたびにトークンを確認
    let logged_in = move || {
        route.track();
        token().is_some()
    };

    let on_logout = move |_| {
        let _ = BrowserStore::Local.remove(TOKEN_KEY);
        navigate(Route::Login);
    };

    view! {
        <header class="header">
            <h1><a href=Route::Visits.hash()>"Heritage - Visits"</a></h1>
            <Show when=logged_in>
                <button class="btn btn-tertiary btn-small" on:click=on_logout>
                    "Logout"
                </button>
            </Show>
        </header>
    }
}
