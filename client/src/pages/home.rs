//! Landing page linking to login and registration.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::guard::{LOGIN_PATH, REGISTER_PATH};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <main class="home-page__content">
                <h1>"Dog Walk Companion"</h1>
                <p class="home-page__tagline">"Enjoy every walk with your dog."</p>
                <nav class="home-page__actions">
                    <A href=LOGIN_PATH attr:class="home-page__button home-page__button--primary">"Sign in"</A>
                    <A href=REGISTER_PATH attr:class="home-page__button">"Register"</A>
                </nav>
            </main>
        </div>
    }
}
