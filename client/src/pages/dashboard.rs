//! Dashboard page: account details and placeholder feature cards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only protected page with content. It renders from the shared auth
//! state and stays `Loading` while the route guard would redirect, so an
//! unconfirmed or missing session never flashes the account details.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::auth::error::AuthError;
use crate::auth::guard::{DASHBOARD_PATH, LOGIN_PATH, Redirect, RouteGuard};
use crate::auth::oracle::SessionOracle;
use crate::auth::session::User;
use crate::components::error_banner::ErrorBanner;
use crate::components::feature_card::FeatureCard;
use crate::components::loading_screen::LoadingScreen;
use crate::state::auth::AuthState;
use crate::state::page::PageState;
use crate::util::auth::{Liveness, use_auth_services, use_auth_state, use_redirect};

/// `Ready(None)` only happens when the guard is bypassed and nobody is
/// signed in.
#[must_use]
pub fn dashboard_state(auth: &AuthState, guard: RouteGuard, failure: Option<&str>) -> PageState<Option<User>> {
    if let Some(message) = failure {
        return PageState::Error(message.to_owned());
    }
    if auth.loading || !guard.decide(DASHBOARD_PATH, auth.session.as_ref()).is_allow() {
        return PageState::Loading;
    }
    PageState::Ready(auth.user().cloned())
}

/// `2024-05-01T09:30:00.000000Z` -> `2024-05-01 09:30`. Anything else is
/// shown as-is.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let Some((date, time)) = raw.split_once('T') else {
        return raw.to_owned();
    };
    let minutes = time.get(..5).unwrap_or(time);
    format!("{date} {minutes}")
}

/// Sign out and return where to go next.
///
/// # Errors
///
/// The remote sign-out failed. The local session is cleared either way.
pub async fn submit_sign_out(oracle: &dyn SessionOracle) -> Result<Redirect, AuthError> {
    oracle.sign_out().await.inspect_err(|err| log::warn!("sign out failed: {err}"))?;
    Ok(Redirect::to(LOGIN_PATH))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_auth_services();
    let auth = use_auth_state();
    let redirect = use_redirect();
    let liveness = Liveness::mount();
    let guard = services.guard();
    let failure = RwSignal::new(None::<String>);

    let state = Memo::new(move |_| {
        failure.with(|failure| auth.with(|auth| dashboard_state(auth, guard, failure.as_deref())))
    });

    let on_sign_out = move |_| {
        let oracle = services.oracle.clone();
        let redirect = redirect.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let result = submit_sign_out(oracle.as_ref()).await;
            if !liveness.is_alive() {
                return;
            }
            match result {
                Ok(target) => {
                    redirect(&target);
                }
                Err(err) => failure.set(Some(err.user_message())),
            }
        });
    };

    let error = Signal::derive(move || state.with(|state| state.error().map(str::to_owned)));

    move || {
        let on_sign_out = on_sign_out.clone();
        match state.get() {
            PageState::Loading => view! { <LoadingScreen/> }.into_any(),
            PageState::Error(_) | PageState::Ready(_) => {
                let user = state.with_untracked(|state| state.ready().cloned().flatten());
                view! {
                    <div class="dashboard-page">
                        <header class="dashboard-header">
                            <div>
                                <h1>"Dashboard"</h1>
                                <p class="dashboard-header__subtitle">"Enjoy your walks together."</p>
                            </div>
                            <button class="dashboard-header__sign-out" on:click=on_sign_out>
                                "Sign out"
                            </button>
                        </header>
                        <ErrorBanner message=error/>
                        <main>
                            {user.map(|user| view! { <AccountCard user=user/> })}
                            <section class="feature-grid">
                                <FeatureCard title="Walk log" description="Record your walks together."/>
                                <FeatureCard title="Statistics" description="See how far you have walked."/>
                                <FeatureCard title="Settings" description="Adjust the app to suit you."/>
                            </section>
                        </main>
                    </div>
                }
                .into_any()
            }
        }
    }
}

#[component]
fn AccountCard(user: User) -> impl IntoView {
    let registered = user.created_at.as_deref().map(format_timestamp);
    view! {
        <section class="account-card">
            <h2>"Account"</h2>
            <dl>
                <dt>"Email"</dt>
                <dd>{user.email}</dd>
                <dt>"User ID"</dt>
                <dd class="account-card__muted">{user.id}</dd>
                {registered.map(|registered| view! {
                    <dt>"Registered"</dt>
                    <dd class="account-card__muted">{registered}</dd>
                })}
            </dl>
        </section>
    }
}
