//! 画像ギャラリー（画像ごとの90°回転ボタン付き）

use super::editable_label::EditableLabel;
use heritage_common::detail::GalleryBlock;
use heritage_common::{LabelEditor, LabelTarget, RotateDirection};
use leptos::prelude::*;

#[component]
pub fn ImageGrid<FR, FC>(
    gallery: GalleryBlock,
    edit_mode: Signal<bool>,
    editor: RwSignal<LabelEditor>,
    on_rotate: FR,
    on_commit: FC,
) -> impl IntoView
where
    FR: Fn(&'static str, usize, RotateDirection) + 'static + Clone + Send + Sync,
    FC: Fn() + 'static + Clone + Send + Sync,
{
    let section = gallery.default_title;
    let images = gallery
        .images
        .into_iter()
        .map(|image| {
            let index = image.index;
            let transform = image.transform();
            let rotate_left = {
                let on_rotate = on_rotate.clone();
                move |_| on_rotate(section, index, RotateDirection::Left)
            };
            let rotate_right = {
                let on_rotate = on_rotate.clone();
                move |_| on_rotate(section, index, RotateDirection::Right)
            };
            view! {
                <div class="image-container">
                    <div class="rotation-controls">
                        <button title="Rotate left" on:click=rotate_left>"↺"</button>
                        <button title="Rotate right" on:click=rotate_right>"↻"</button>
                    </div>
                    <div class="image-wrapper" style:transform=transform>
                        <img src=image.url alt=image.alt loading="lazy" />
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="section">
            <h3 class="section-title">
                <EditableLabel
                    target=LabelTarget::title(gallery.default_title)
                    text=gallery.title
                    edit_mode=edit_mode
                    editor=editor
                    on_commit=on_commit
                />
            </h3>
            <div class="image-grid">{images}</div>
        </section>
    }
}
