//! Registration page: name, email, password and confirmation.
//!
//! Projects that auto-confirm hand back a session and go straight to the
//! dashboard; everyone else waits on the verify-email page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::error::{AuthError, ValidationError};
use crate::auth::guard::{LOGIN_PATH, ROOT_PATH, Redirect};
use crate::auth::oracle::{Profile, SessionOracle, SignUp};
use crate::auth::session::Session;
use crate::components::error_banner::ErrorBanner;
use crate::util::auth::{Liveness, use_auth_services, use_redirect};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub profile: Profile,
}

/// Check the form in field order and return the first problem.
///
/// # Errors
///
/// The first failing field.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Registration, ValidationError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(Registration {
        email: email.to_owned(),
        password: password.to_owned(),
        profile: Profile { name: name.to_owned() },
    })
}

#[must_use]
pub fn registration_target(outcome: &SignUp, email: &str) -> Redirect {
    if outcome.session().is_some_and(Session::is_confirmed) {
        Redirect::dashboard()
    } else {
        Redirect::verify_email(email)
    }
}

/// Validate, sign up, and pick the next page.
///
/// # Errors
///
/// Validation failures and oracle rejections.
pub async fn submit_registration(
    oracle: &dyn SessionOracle,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Redirect, AuthError> {
    let registration = validate_registration(name, email, password, confirm)?;
    let outcome = oracle
        .sign_up(&registration.email, &registration.password, &registration.profile)
        .await
        .inspect_err(|err| log::warn!("sign up failed for {}: {err}", registration.email))?;
    log::debug!("registered {} (confirmed session: {})", outcome.user().id, outcome.session().is_some());
    Ok(registration_target(&outcome, &registration.email))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let services = use_auth_services();
    let redirect = use_redirect();
    let liveness = Liveness::mount();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let (name_value, email_value) = (name.get_untracked(), email.get_untracked());
        let (password_value, confirm_value) = (password.get_untracked(), confirm.get_untracked());
        if let Err(err) = validate_registration(&name_value, &email_value, &password_value, &confirm_value) {
            error.set(Some(err.to_string()));
            return;
        }
        busy.set(true);

        let oracle = services.oracle.clone();
        let redirect = redirect.clone();
        let liveness = liveness.clone();
        leptos::task::spawn_local(async move {
            let result =
                submit_registration(oracle.as_ref(), &name_value, &email_value, &password_value, &confirm_value)
                    .await;
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
                <h1>"Create an account"</h1>
                <p class="auth-card__subtitle">"Register to start logging walks."</p>
                <ErrorBanner message=error/>
                <form class="auth-form" on:submit=on_submit>
                    {form_field(busy, "name", "text", "Name", "Your name", name)}
                    {form_field(busy, "email", "email", "Email", "you@example.com", email)}
                    {form_field(busy, "password", "password", "Password", "At least 8 characters", password)}
                    {form_field(busy, "confirm", "password", "Confirm password", "Repeat your password", confirm)}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__links">
                    <A href=LOGIN_PATH>"Already registered? Sign in"</A>
                </p>
                <p class="auth-card__links">
                    <A href=ROOT_PATH>"Back to the home page"</A>
                </p>
            </main>
        </div>
    }
}

fn form_field(
    busy: RwSignal<bool>,
    id: &'static str,
    kind: &'static str,
    label: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="auth-field">
            <label for=id>{label}</label>
            <input
                id=id
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || busy.get()
            />
        </div>
    }
}
