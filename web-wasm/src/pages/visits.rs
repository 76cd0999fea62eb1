//! 訪問一覧ページ（検索・ページ送り・削除・承認切替）

use crate::api;
use crate::components::pagination::{apply, PageAction, Pagination};
use crate::components::visit_table::VisitTable;
use crate::storage::BrowserStore;
use heritage_common::records::{confirmation_prompt, delete_prompt, remove_row, replace_row};
use heritage_common::{CacheLookup, ListCache, ListView, VisitSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashSet;

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 一覧キャッシュを書き換える
fn write_cache(visits: &[VisitSummary]) {
    let store = BrowserStore::Session;
    if let Err(e) = ListCache::new(&store).store(visits, now_ms()) {
        web_sys::console::warn_1(&e.to_string().into());
    }
}

#[component]
pub fn VisitsPage() -> impl IntoView {
    let visits = RwSignal::new(Vec::<VisitSummary>::new());
    let list_view = RwSignal::new(ListView::new(&[]));
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(HashSet::<i64>::new());
    let confirming = RwSignal::new(HashSet::<i64>::new());

    let set_visits = move |list: Vec<VisitSummary>| {
        list_view.update(|lv| lv.refresh(&list));
        visits.set(list);
    };

    let fetch = move || {
        spawn_local(async move {
            match api::list_visits().await {
                Ok(list) => {
                    write_cache(&list);
                    set_visits(list);
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    };

    // キャッシュがあれば即表示し、期限切れなら裏で再取得
    let store = BrowserStore::Session;
    match ListCache::new(&store).lookup(now_ms()) {
        CacheLookup::Fresh(list) => set_visits(list),
        CacheLookup::Stale(list) => {
            set_visits(list);
            fetch();
        }
        CacheLookup::Missing => {
            loading.set(true);
            fetch();
        }
    }

    let on_search = move |ev: web_sys::Event| {
        let query = event_target_value(&ev);
        visits.with_untracked(|list| list_view.update(|lv| lv.set_query(list, &query)));
    };

    let on_page = move |action: PageAction| {
        list_view.update(|lv| apply(lv.pager_mut(), action));
    };

    let on_delete = move |id: i64| {
        if deleting.with_untracked(|set| set.contains(&id)) || !confirm(&delete_prompt(id)) {
            return;
        }
        deleting.update(|set| {
            set.insert(id);
        });
        spawn_local(async move {
            match api::delete_visit(id).await {
                Ok(()) => {
                    let mut list = visits.get_untracked();
                    remove_row(&mut list, id);
                    write_cache(&list);
                    set_visits(list);
                }
                Err(e) => error.set(Some(e)),
            }
            deleting.update(|set| {
                set.remove(&id);
            });
        });
    };

    let on_toggle_confirm = move |id: i64, value: bool| {
        if confirming.with_untracked(|set| set.contains(&id))
            || !confirm(&confirmation_prompt(id, value))
        {
            return;
        }
        confirming.update(|set| {
            set.insert(id);
        });
        spawn_local(async move {
            match api::set_confirmation(id, value).await {
                Ok(updated) => {
                    let mut list = visits.get_untracked();
                    replace_row(&mut list, id, &updated);
                    write_cache(&list);
                    set_visits(list);
                }
                Err(e) => error.set(Some(e)),
            }
            confirming.update(|set| {
                set.remove(&id);
            });
        });
    };

    let rows = Signal::derive(move || {
        list_view.with(|lv| visits.with(|list| lv.rows(list).into_iter().cloned().collect::<Vec<_>>()))
    });
    let pager = Signal::derive(move || list_view.with(|lv| *lv.pager()));

    view! {
        <div class="container">
            <h2>"Visits"</h2>
            <input
                type="text"
                class="search"
                placeholder="Search..."
                prop:value=move || list_view.with(|lv| lv.query().to_string())
                on:input=on_search
            />

            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-muted">"Loading..."</p> }
            >
                <VisitTable
                    rows=rows
                    deleting=deleting
                    confirming=confirming
                    on_delete=on_delete
                    on_toggle_confirm=on_toggle_confirm
                />
                <Pagination pager=pager on_change=on_page />
            </Show>
        </div>
    }
}

