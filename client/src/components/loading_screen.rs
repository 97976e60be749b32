//! Full-page spinner shown while a page's state is `Loading`.

use leptos::prelude::*;

#[component]
pub fn LoadingScreen(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_owned());
    view! {
        <div class="loading-screen" role="status">
            <div class="loading-screen__spinner"></div>
            <p class="loading-screen__label">{label}</p>
        </div>
    }
}
