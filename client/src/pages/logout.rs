//! Logout page: signs out on mount, then returns to the login page.
//!
//! The page holds the redirect latch for its own path before signing out, so
//! the `SignedOut` event does not cut the status message short. Its delayed
//! navigation is the single redirect away from `/logout`.

#[cfg(test)]
#[path = "logout_test.rs"]
mod logout_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::auth::error::AuthError;
use crate::auth::guard::LOGOUT_PATH;
use crate::auth::oracle::SessionOracle;
use crate::state::page::PageState;
use crate::util::auth::{Liveness, use_auth_services};

pub const SUCCESS_DELAY: Duration = Duration::from_secs(1);
pub const FAILURE_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutStatus {
    pub message: &'static str,
    pub delay: Duration,
}

#[must_use]
pub fn logout_status(result: &Result<(), AuthError>) -> LogoutStatus {
    match result {
        Ok(()) => LogoutStatus { message: "You have been signed out.", delay: SUCCESS_DELAY },
        Err(_) => LogoutStatus { message: "Something went wrong while signing out.", delay: FAILURE_DELAY },
    }
}

pub async fn perform_logout(oracle: &dyn SessionOracle) -> LogoutStatus {
    let result = oracle.sign_out().await;
    if let Err(err) = &result {
        log::warn!("sign out failed: {err}");
    }
    logout_status(&result)
}

#[component]
pub fn LogoutPage() -> impl IntoView {
    let services = use_auth_services();
    let liveness = Liveness::mount();
    let state = RwSignal::new(PageState::<LogoutStatus>::Loading);

    services.listener.latch().try_arm(LOGOUT_PATH);

    #[cfg(feature = "hydrate")]
    {
        let oracle = services.oracle.clone();
        let navigate = leptos_router::hooks::use_navigate();
        leptos::task::spawn_local(async move {
            let status = perform_logout(oracle.as_ref()).await;
            if !liveness.is_alive() {
                return;
            }
            let delay = status.delay;
            state.set(PageState::Ready(status));
            gloo_timers::future::sleep(delay).await;
            if liveness.is_alive() {
                navigate(crate::auth::guard::LOGIN_PATH, leptos_router::NavigateOptions::default());
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (liveness, &services.oracle);
    }

    view! {
        <div class="auth-page">
            <main class="auth-card auth-card--centered">
                <Show when=move || state.with(PageState::is_loading)>
                    <div class="loading-screen__spinner"></div>
                </Show>
                <h1>"Sign out"</h1>
                <p>
                    {move || {
                        state.with(|state| state.ready().map_or("Signing you out...", |status| status.message))
                    }}
                </p>
                <Show when=move || state.with(|state| state.ready().is_some())>
                    <p class="auth-card__muted">"Taking you to the login page..."</p>
                </Show>
            </main>
        </div>
    }
}
