//! Login page: email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! A confirmed sign-in lands on the `redirectedFrom` target (or the
//! dashboard); an unconfirmed account is sent to the verify-email page. The
//! oracle also emits `SignedIn`, which the app-wide guard forwards the same
//! way; both go through the shared redirect latch so only one navigates.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::auth::error::{AuthError, ValidationError};
use crate::auth::guard::{REDIRECTED_FROM_KEY, REGISTER_PATH, ROOT_PATH, Redirect, post_login_target};
use crate::auth::oracle::SessionOracle;
use crate::auth::session::Session;
use crate::components::error_banner::ErrorBanner;
use crate::util::auth::{Liveness, use_auth_services, use_redirect};

/// Trimmed email and the password as typed.
///
/// # Errors
///
/// Returns the first missing field.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Where a successful sign-in goes next.
#[must_use]
pub fn login_target(session: &Session, email: &str, redirected_from: Option<&str>) -> Redirect {
    if session.is_confirmed() {
        post_login_target(redirected_from)
    } else {
        Redirect::verify_email(email)
    }
}

/// Validate, sign in, and pick the next page.
///
/// # Errors
///
/// Validation failures and oracle rejections.
pub async fn submit_login(
    oracle: &dyn SessionOracle,
    email: &str,
    password: &str,
    redirected_from: Option<&str>,
) -> Result<Redirect, AuthError> {
    let (email, password) = validate_login_input(email, password)?;
    let session = oracle.sign_in(&email, &password).await.inspect_err(|err| {
        log::warn!("sign in failed for {email}: {err}");
    })?;
    Ok(login_target(&session, &email, redirected_from))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_auth_services();
    let redirect = use_redirect();
    let query = use_query_map();
    let liveness = Liveness::mount();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if let Err(err) = validate_login_input(&email_value, &password_value) {
            error.set(Some(err.to_string()));
            return;
        }
        busy.set(true);

        let oracle = services.oracle.clone();
        let redirect = redirect.clone();
        let liveness = liveness.clone();
        let redirected_from = query.with_untracked(|params| params.get(REDIRECTED_FROM_KEY));
        leptos::task::spawn_local(async move {
            let result =
                submit_login(oracle.as_ref(), &email_value, &password_value, redirected_from.as_deref()).await;
            if !liveness.is_alive() {
                return;
            }
            busy.set(false);
            match result {
                Ok(target) => {
                    redirect(&target);
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <div class="auth-page">
            <main class="auth-card">
                <h1>"Sign in"</h1>
                <p class="auth-card__subtitle">"Sign in to your account."</p>
                <ErrorBanner message=error/>
                <form class="auth-form" on:submit=on_submit>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        placeholder="Your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        disabled=move || busy.get()
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="auth-card__links">
                    <A href=REGISTER_PATH>"No account yet? Register"</A>
                </p>
                <p class="auth-card__links">
                    <A href=ROOT_PATH>"Back to the home page"</A>
                </p>
            </main>
        </div>
    }
}
