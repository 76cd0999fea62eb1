//! 訪問一覧テーブル

use crate::route::Route;
use heritage_common::VisitSummary;
use leptos::prelude::*;
use std::collections::HashSet;

#[component]
pub fn VisitTable<FD, FC>(
    rows: Signal<Vec<VisitSummary>>,
    deleting: RwSignal<HashSet<i64>>,
    confirming: RwSignal<HashSet<i64>>,
    on_delete: FD,
    on_toggle_confirm: FC,
) -> impl IntoView
where
    FD: Fn(i64) + 'static + Clone + Send + Sync,
    FC: Fn(i64, bool) + 'static + Clone + Send + Sync,
{
    view! {
        <table class="visit-table">
            <thead>
                <tr>
                    <th class="id-col">"#"</th>
                    <th>"User"</th>
                    <th>"Visit Date"</th>
                    <th>"Created"</th>
                    <th>"Plot #"</th>
                    <th>"Confirmed"</th>
                    <th>"View"</th>
                    <th>"Delete"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=|visit| (visit.id, visit.confirmed())
                    children=move |visit| {
                        let id = visit.id;
                        let confirmed = visit.confirmed();
                        let on_delete = on_delete.clone();
                        let on_toggle_confirm = on_toggle_confirm.clone();
                        let is_deleting = move || deleting.with(|set| set.contains(&id));
                        view! {
                            <tr>
                                <td class="id-col">{id}</td>
                                <td>{visit.user().to_string()}</td>
                                <td>{visit.visit_date().to_string()}</td>
                                <td>{visit.created_at().to_string()}</td>
                                <td>{visit.plot_number().to_string()}</td>
                                <td>
                                    <input
                                        type="checkbox"
                                        prop:checked=confirmed
                                        disabled=move || confirming.with(|set| set.contains(&id))
                                        on:change=move |ev| {
                                            // 確定するまで表示は元の状態のまま
                                            event_target::<web_sys::HtmlInputElement>(&ev)
                                                .set_checked(confirmed);
                                            on_toggle_confirm(id, !confirmed);
                                        }
                                    />
                                </td>
                                <td>
                                    <a href=Route::Visit(id).hash()>"View"</a>
                                </td>
                                <td>
                                    <button
                                        class="btn btn-danger btn-small"
                                        disabled=is_deleting
                                        on:click=move |_| on_delete(id)
                                    >
                                        {move || if is_deleting() { "Deleting..." } else { "Delete" }}
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
