//! 情報セクション（ラベル: 値 のグリッド）

use super::editable_label::EditableLabel;
use heritage_common::detail::InfoBlock;
use heritage_common::{LabelEditor, LabelTarget};
use leptos::prelude::*;

#[component]
pub fn InfoSection<FC>(
    block: InfoBlock,
    edit_mode: Signal<bool>,
    editor: RwSignal<LabelEditor>,
    on_commit: FC,
) -> impl IntoView
where
    FC: Fn() + 'static + Clone + Send + Sync,
{
    let rows = block
        .rows
        .into_iter()
        .map(|row| {
            let empty = row.is_empty();
            view! {
                <div class="info-item">
                    <div class="label">
                        <EditableLabel
                            target=LabelTarget::field(row.default_label)
                            text=row.label
                            edit_mode=edit_mode
                            editor=editor
                            on_commit=on_commit.clone()
                        />
                    </div>
                    <div class="value" class:empty=empty>{row.value}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="section">
            <h3 class="section-title">
                <EditableLabel
                    target=LabelTarget::title(block.default_title)
                    text=block.title
                    edit_mode=edit_mode
                    editor=editor
                    on_commit=on_commit.clone()
                />
            </h3>
            <div class="grid">{rows}</div>
        </section>
    }
}
