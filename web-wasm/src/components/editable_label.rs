//! インライン編集できるラベル
//!
//! 編集モード中は入力欄になる。Enterかフォーカス外れで確定、Escで取り消し。

use heritage_common::{LabelEditor, LabelTarget};
use leptos::prelude::*;
use web_sys::{Event, FocusEvent, KeyboardEvent};

#[component]
pub fn EditableLabel<FC>(
    target: LabelTarget,
    /// 現在の表示テキスト
    text: String,
    edit_mode: Signal<bool>,
    editor: RwSignal<LabelEditor>,
    on_commit: FC,
) -> impl IntoView
where
    FC: Fn() + 'static + Clone + Send + Sync,
{
    let display = text.clone();
    let value = {
        let target = target.clone();
        move || {
            editor.with(|e| {
                if e.is_editing(&target) {
                    e.draft().unwrap_or_default().to_string()
                } else {
                    text.clone()
                }
            })
        }
    };

    let on_focus = {
        let target = target.clone();
        let current = display.clone();
        move |_: FocusEvent| {
            if !editor.with_untracked(|e| e.is_editing(&target)) {
                editor.update(|e| e.begin(target.clone(), &current));
            }
        }
    };

    let on_input = move |ev: Event| {
        let text = event_target_value(&ev);
        editor.update(|e| e.input(&text));
    };

    let on_keydown = {
        let target = target.clone();
        let on_commit = on_commit.clone();
        move |ev: KeyboardEvent| match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                if editor.with_untracked(|e| e.is_editing(&target)) {
                    on_commit();
                }
            }
            "Escape" => {
                editor.update(|e| e.cancel());
            }
            _ => {}
        }
    };

    let on_blur = {
        let target = target.clone();
        move |_: FocusEvent| {
            if editor.with_untracked(|e| e.is_editing(&target)) {
                on_commit();
            }
        }
    };

    view! {
        <Show
            when=move || edit_mode.get()
            fallback={
                let display = display.clone();
                move || view! { <span class="label-text">{display.clone()}</span> }
            }
        >
            <input
                type="text"
                class="label-input"
                prop:value=value.clone()
                on:focus=on_focus.clone()
                on:input=on_input
                on:keydown=on_keydown.clone()
                on:blur=on_blur.clone()
            />
        </Show>
    }
}
