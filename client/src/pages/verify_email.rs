//! Verify-email page: instructions plus a resend button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached after registration or after signing in with an unconfirmed
//! account. Once the auth state holds a confirmed session (already on mount,
//! or after the confirmation link signs the user in) the page moves on to the
//! dashboard.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::auth::guard::{EMAIL_KEY, LOGIN_PATH, ROOT_PATH, Redirect};
use crate::auth::resend::ResendGate;
use crate::auth::session::Session;
use crate::components::loading_screen::LoadingScreen;
use crate::state::auth::AuthState;
use crate::state::page::PageState;
use crate::util::auth::{Liveness, use_auth_services, use_auth_state, use_redirect};
use crate::util::browser;

/// Dashboard redirect for a session that no longer needs verification.
#[must_use]
pub fn confirmed_redirect(session: Option<&Session>) -> Option<Redirect> {
    session.filter(|session| session.is_confirmed()).map(|_| Redirect::dashboard())
}

/// `Ready` carries the address the confirmation mail went to, if known.
/// A confirmed session stays `Loading` while the redirect is under way.
#[must_use]
pub fn verify_email_state(auth: &AuthState, email: Option<&str>) -> PageState<Option<String>> {
    if auth.loading || auth.is_confirmed() {
        return PageState::Loading;
    }
    let email = email.map(str::trim).filter(|email| !email.is_empty());
    PageState::Ready(email.map(str::to_owned))
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let services = use_auth_services();
    let auth = use_auth_state();
    let redirect = use_redirect();
    let query = use_query_map();
    let liveness = Liveness::mount();
    let gate = ResendGate::new();
    let resending = RwSignal::new(false);

    Effect::new(move || {
        let target = auth.with(|state| {
            if state.loading { None } else { confirmed_redirect(state.session.as_ref()) }
        });
        if let Some(target) = target {
            redirect(&target);
        }
    });

    let state = Memo::new(move |_| {
        let email = query.with(|params| params.get(EMAIL_KEY));
        auth.with(|auth| verify_email_state(auth, email.as_deref()))
    });

    let on_resend = move |email: String| {
        let Some(ticket) = gate.try_begin() else {
            return;
        };
        resending.set(true);
        let oracle = services.oracle.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let outcome = ticket.send(oracle.as_ref(), &email).await;
            if let Some(message) = outcome.notification() {
                browser::alert(&message);
            }
            if liveness.is_alive() {
                resending.set(false);
            }
        });
    };

    move || match state.get() {
        PageState::Loading | PageState::Error(_) => view! { <LoadingScreen/> }.into_any(),
        PageState::Ready(email) => {
            let on_resend = on_resend.clone();
            view! {
                <div class="auth-page">
                    <main class="auth-card">
                        <h1>"Confirm your email"</h1>
                        <p class="auth-card__subtitle">"Thanks for registering."</p>
                        <div class="notice notice--info">
                            <p>
                                {match email.clone() {
                                    Some(address) => {
                                        view! { "We sent a confirmation email to " <strong>{address}</strong> "." }
                                            .into_any()
                                    }
                                    None => view! { "We sent you a confirmation email." }.into_any(),
                                }}
                            </p>
                            <p>"Click the link in the email to confirm your address."</p>
                        </div>
                        <h2>"Next steps"</h2>
                        <ol class="steps">
                            <li>"Open your inbox."</li>
                            <li>"Click the link in the confirmation email."</li>
                            <li>"You will be signed in automatically."</li>
                        </ol>
                        {email.map(|address| {
                            view! {
                                <button
                                    class="auth-button"
                                    disabled=move || resending.get()
                                    on:click=move |_| on_resend(address.clone())
                                >
                                    {move || if resending.get() { "Sending..." } else { "Resend confirmation email" }}
                                </button>
                            }
                        })}
                        <div class="notice notice--warning">
                            <p><strong>"No email?"</strong></p>
                            <ul>
                                <li>"Check your spam folder."</li>
                                <li>"Make sure the address is correct."</li>
                                <li>"Use the resend button above."</li>
                            </ul>
                        </div>
                        <p class="auth-card__links">
                            <A href=LOGIN_PATH>"Back to sign in"</A>
                        </p>
                        <p class="auth-card__links">
                            <A href=ROOT_PATH>"Back to the home page"</A>
                        </p>
                    </main>
                </div>
            }
            .into_any()
        }
    }
}
