//! ページ送り（1ページ以下なら非表示）

use heritage_common::Pager;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
    Go(usize),
}

pub fn apply(pager: &mut Pager, action: PageAction) {
    match action {
        PageAction::First => pager.first(),
        PageAction::Prev => pager.prev(),
        PageAction::Next => pager.next(),
        PageAction::Last => pager.last(),
        PageAction::Go(page) => pager.go_to(page),
    }
}

#[component]
pub fn Pagination<F>(pager: Signal<Pager>, on_change: F) -> impl IntoView
where
    F: Fn(PageAction) + 'static + Clone + Send + Sync,
{
    let nav_button = {
        let on_change = on_change.clone();
        move |label: &'static str, action: PageAction, disabled: Signal<bool>| {
            let on_change = on_change.clone();
            view! {
                <button
                    class="page-btn"
                    disabled=move || disabled.get()
                    on:click=move |_| on_change(action)
                >
                    {label}
                </button>
            }
        }
    };

    let at_first = Signal::derive(move || pager.with(|p| p.at_first()));
    let at_last = Signal::derive(move || pager.with(|p| p.at_last()));

    view! {
        <Show when=move || pager.with(|p| p.controls_visible())>
            <div class="pagination">
                {nav_button("<<", PageAction::First, at_first)}
                {nav_button("<", PageAction::Prev, at_first)}
                {
                    let on_change = on_change.clone();
                    move || {
                        let (window, current) = pager.with(|p| (p.page_window(), p.current_page()));
                        window
                            .map(|page| {
                                let on_change = on_change.clone();
                                view! {
                                    <button
                                        class="page-btn"
                                        class:active=page == current
                                        on:click=move |_| on_change(PageAction::Go(page))
                                    >
                                        {page}
                                    </button>
                                }
                            })
                            .collect_view()
                    }
                }
                {nav_button(">", PageAction::Next, at_last)}
                {nav_button(">>", PageAction::Last, at_last)}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_actions() {
        let mut pager = Pager::new(45);
        apply(&mut pager, PageAction::Last);
        assert_eq!(pager.current_page(), 5);
        apply(&mut pager, PageAction::Next);
        assert_eq!(pager.current_page(), 5);
        apply(&mut pager, PageAction::Prev);
        assert_eq!(pager.current_page(), 4);
        apply(&mut pager, PageAction::Go(2));
        assert_eq!(pager.current_page(), 2);
        apply(&mut pager, PageAction::First);
        assert_eq!(pager.current_page(), 1);
    }
}
