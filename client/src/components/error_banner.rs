//! Inline error message for forms and page failures.

use leptos::prelude::*;

/// Renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.with(Option::is_some)>
            <p class="error-banner" role="alert">
                {move || message.get().unwrap_or_default()}
            </p>
        </Show>
    }
}
