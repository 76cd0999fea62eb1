//! 訪問詳細ページ
//!
//! トークンが無ければログインへ移動する（表示側のガードのみ）。

use crate::api::{self, API_BASE};
use crate::components::export_buttons::ExportButtons;
use crate::components::image_grid::ImageGrid;
use crate::components::info_section::InfoSection;
use crate::export;
use crate::route::{navigate, Route};
use crate::storage::{self, BrowserStore};
use heritage_common::{
    render_detail, DetailBlock, EditMode, LabelEditor, LabelKind, LabelOverrides,
    RenderContext, RotateDirection, RotationState, VisitDetail,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Loaded(VisitDetail),
    NotFound,
    Failed(String),
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn VisitDetailPage(id: i64) -> impl IntoView {
    let Some(token) = storage::token() else {
        navigate(Route::Login);
        return view! { <p class="text-muted">"Redirecting to login..."</p> }.into_any();
    };

    let store = BrowserStore::Local;
    let state = RwSignal::new(LoadState::Loading);
    let labels = RwSignal::new(LabelOverrides::load(&store, LabelKind::Field));
    let titles = RwSignal::new(LabelOverrides::load(&store, LabelKind::Title));
    let rotations = RwSignal::new(RotationState::load(&store, id));
    let edit_mode = RwSignal::new(EditMode::default());
    let editor = RwSignal::new(LabelEditor::default());
    let (exporting, set_exporting) = signal(false);

    spawn_local(async move {
        let next = match api::get_visit(id).await {
            Ok(Some(visit)) => LoadState::Loaded(visit),
            Ok(None) => LoadState::NotFound,
            Err(e) => LoadState::Failed(e),
        };
        state.set(next);
    });

    let detail = Memo::new(move |_| {
        state.with(|s| match s {
            LoadState::Loaded(visit) => labels.with(|labels| {
                titles.with(|titles| {
                    rotations.with(|rotations| {
                        Some(render_detail(
                            visit,
                            &RenderContext {
                                labels,
                                titles,
                                rotations,
                                media_base: API_BASE,
                            },
                        ))
                    })
                })
            }),
            _ => None,
        })
    });

    let on_commit = move || {
        let mut current_labels = labels.get_untracked();
        let mut current_titles = titles.get_untracked();
        let mut current_editor = editor.get_untracked();
        if current_editor.is_unchanged() {
            current_editor.cancel();
            editor.set(current_editor);
            return;
        }
        let result = current_editor.commit(&BrowserStore::Local, &mut current_labels, &mut current_titles);
        editor.set(current_editor);
        match result {
            Ok(_) => {
                labels.set(current_labels);
                titles.set(current_titles);
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    let on_toggle_edit = move |_| {
        if edit_mode.get_untracked().is_editing() {
            on_commit();
        }
        edit_mode.update(|m| m.toggle());
    };

    let on_rotate = move |section: &'static str, index: usize, direction: RotateDirection| {
        rotations.update(|r| {
            if let Err(e) = r.rotate_and_save(&BrowserStore::Local, section, index, direction) {
                web_sys::console::warn_1(&e.to_string().into());
            }
        });
    };

    let on_print = move |_| export::print();

    let on_export = move |_| {
        let Some(view) = detail.get_untracked() else {
            return;
        };
        let token = token.clone();
        set_exporting.set(true);
        spawn_local(async move {
            if let Err(e) = export::export_visit(&view, &token).await {
                alert(&format!("Export failed: {}", e));
            }
            set_exporting.set(false);
        });
    };

    let editing = Signal::derive(move || edit_mode.get().is_editing());

    let blocks = move || {
        detail.get().map(|view| {
            view.blocks
                .into_iter()
                .map(|block| match block {
                    DetailBlock::Info(info) => view! {
                        <InfoSection
                            block=info
                            edit_mode=editing
                            editor=editor
                            on_commit=on_commit
                        />
                    }
                    .into_any(),
                    DetailBlock::Gallery(gallery) => view! {
                        <ImageGrid
                            gallery=gallery
                            edit_mode=editing
                            editor=editor
                            on_rotate=on_rotate
                            on_commit=on_commit
                        />
                    }
                    .into_any(),
                })
                .collect_view()
        })
    };

    view! {
        <div class="container">
            <div class="detail-header">
                <h2>"Visit Details"</h2>
                <button class="btn btn-secondary" on:click=on_toggle_edit>
                    {move || edit_mode.get().button_text()}
                </button>
                <ExportButtons exporting=exporting on_print=on_print on_export=on_export />
            </div>

            {move || state.with(|s| match s {
                LoadState::Loading => Some(view! { <p class="text-muted">"Loading..."</p> }.into_any()),
                LoadState::NotFound => Some(view! { <p class="error">"Visit not found"</p> }.into_any()),
                LoadState::Failed(e) => Some(view! { <p class="error">{e.clone()}</p> }.into_any()),
                LoadState::Loaded(_) => None,
            })}

            {blocks}
        </div>
    }
    .into_any()
}
