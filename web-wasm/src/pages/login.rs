//! ログイン（トークン入力）

use crate::route::{navigate, Route};
use crate::storage::BrowserStore;
use heritage_common::storage::TOKEN_KEY;
use heritage_common::KvStore;
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (token, set_token) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = token.get_untracked();
        if value.trim().is_empty() {
            set_error.set(Some("Token is required".to_string()));
            return;
        }
        match BrowserStore::Local.set(TOKEN_KEY, value.trim()) {
            Ok(()) => navigate(Route::Visits),
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="login">
            <h2>"Login"</h2>
            <form on:submit=on_submit>
                <input
                    type="password"
                    placeholder="Access token"
                    prop:value=move || token.get()
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">"Login"</button>
            </form>
            {move || error.get().map(|e| view! { <p class="error">{e}</p> })}
        </div>
    }
}
