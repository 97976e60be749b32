//! Dashboard card for a feature that is not built yet.

use leptos::prelude::*;

#[component]
pub fn FeatureCard(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <article class="feature-card">
            <h3 class="feature-card__title">{title}</h3>
            <p class="feature-card__description">{description}</p>
            <span class="feature-card__badge">"Coming soon"</span>
        </article>
    }
}
