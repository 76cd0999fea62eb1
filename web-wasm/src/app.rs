//! メインアプリケーションコンポーネント

use crate::components::header::Header;
use crate::pages::{login::LoginPage, visit_detail::VisitDetailPage, visits::VisitsPage};
use crate::route::{self, Route};
use gloo::events::EventListener;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let (route, set_route) = signal(route::current());

    // hashchange でページ切り替え（アプリと同じ寿命なので解除しない）
    if let Some(window) = web_sys::window() {
        EventListener::new(&window, "hashchange", move |_| {
            set_route.set(route::current());
        })
        .forget();
    }

    view! {
        <div class="app">
            <Header route=route />
            {move || match route.get() {
                Route::Visits | Route::NotFound => view! { <VisitsPage /> }.into_any(),
                Route::Visit(id) => view! { <VisitDetailPage id=id /> }.into_any(),
                Route::Login => view! { <LoginPage /> }.into_any(),
            }}
        </div>
    }
}
