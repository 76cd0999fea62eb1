//! 印刷・エクスポートボタン

use leptos::prelude::*;

#[component]
pub fn ExportButtons<FP, FE>(
    exporting: ReadSignal<bool>,
    on_print: FP,
    on_export: FE,
) -> impl IntoView
where
    FP: Fn(()) + 'static + Clone + Send + Sync,
    FE: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="export-buttons">
            <button
                class="btn btn-secondary"
                on:click={
                    let on_print = on_print.clone();
                    move |_| on_print(())
                }
            >
                "Print"
            </button>

            <button
                class="btn btn-primary"
                disabled=move || exporting.get()
                on:click={
                    let on_export = on_export.clone();
                    move |_| on_export(())
                }
            >
                {move || if exporting.get() { "Exporting..." } else { "Export" }}
            </button>
        </div>
    }
}
