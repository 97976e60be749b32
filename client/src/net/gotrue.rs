//! Session oracle backed by a GoTrue-compatible auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Client-side (hydrate): real HTTP calls via `gloo-net`, the session is
//! persisted in `localStorage`, refreshed shortly before expiry, and picked
//! up from the URL fragment the confirmation email links back with.
//! Server-side (SSR): there is no browser session, so `current_session` is
//! `None` and network operations fail with [`AuthError::Unavailable`].
//!
//! Every state change goes through `commit`, which stores the session and
//! emits exactly one auth event.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod gotrue_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::types::{
    PasswordGrant, RefreshGrant, ResendRequest, SignUpRequest, SignUpResponse, WireSession, WireUser, decode_response,
    encode_body, expect_success,
};
use crate::auth::error::AuthError;
use crate::auth::oracle::{EventHandler, Profile, SessionOracle, SignUp, SubscriberRegistry, Subscription};
use crate::auth::session::{AuthEvent, AuthEventKind, Session};
use crate::config::AuthConfig;
use crate::util::{browser, storage};

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "dogwalk.auth.session";

const AUTH_PREFIX: &str = "/auth/v1";

fn token_endpoint(config: &AuthConfig, grant_type: &str) -> String {
    config.endpoint(&format!("{AUTH_PREFIX}/token?grant_type={grant_type}"))
}

fn auth_endpoint(config: &AuthConfig, name: &str) -> String {
    config.endpoint(&format!("{AUTH_PREFIX}/{name}"))
}

// =============================================================================
// URL FRAGMENT
// =============================================================================

/// Tokens carried in the fragment of an email-confirmation redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
}

impl FragmentTokens {
    fn into_wire(self, user: WireUser) -> WireSession {
        WireSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            expires_at: self.expires_at,
            user,
        }
    }
}

fn fragment_pairs(fragment: &str) -> impl Iterator<Item = (&str, String)> {
    fragment.trim_start_matches('#').split('&').filter_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        let value = urlencoding::decode(&value.replace('+', " ")).ok()?.into_owned();
        Some((key, value))
    })
}

/// Parse `#access_token=..&refresh_token=..&expires_in=..`. Returns `None`
/// unless both tokens are present.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<FragmentTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    for (key, value) in fragment_pairs(fragment) {
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse().ok(),
            "expires_at" => expires_at = value.parse().ok(),
            _ => {}
        }
    }
    Some(FragmentTokens {
        access_token: access_token.filter(|t| !t.is_empty())?,
        refresh_token: refresh_token.filter(|t| !t.is_empty())?,
        expires_in,
        expires_at,
    })
}

/// `error_description` of a failed confirmation redirect.
#[must_use]
pub fn fragment_error(fragment: &str) -> Option<String> {
    fragment_pairs(fragment).find(|(key, _)| *key == "error_description").map(|(_, value)| value)
}

/// Event and resulting session for a refresh attempt: a new session is
/// announced as `TokenRefreshed`, a rejected refresh clears the session.
#[must_use]
pub fn renewal(result: Result<Session, AuthError>) -> (AuthEventKind, Option<Session>) {
    match result {
        Ok(fresh) => (AuthEventKind::TokenRefreshed, Some(fresh)),
        Err(err) => {
            log::warn!("session refresh failed: {err}");
            (AuthEventKind::SignedOut, None)
        }
    }
}

// =============================================================================
// ORACLE
// =============================================================================

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy)]
enum Method {
    Get,
    Post,
}

pub struct GoTrueOracle {
    config: AuthConfig,
    session: Mutex<Option<Session>>,
    registry: SubscriberRegistry,
    restored: AtomicBool,
}

impl GoTrueOracle {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
            registry: SubscriberRegistry::new(),
            restored: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn snapshot(&self) -> Option<Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn ensure_configured(&self) -> Result<(), AuthError> {
        self.config.validate().map_err(|err| AuthError::Configuration(err.to_string()))
    }

    /// Store `session`, persist it, and emit one `kind` event.
    fn commit(&self, kind: AuthEventKind, session: Option<Session>) {
        {
            let mut current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            current.clone_from(&session);
        }
        match &session {
            Some(session) => storage::save_json(SESSION_STORAGE_KEY, session),
            None => storage::remove(SESSION_STORAGE_KEY),
        }
        log::debug!("auth state {kind}: {}", session.as_ref().map_or("no session", Session::email));
        self.registry.emit(&AuthEvent::new(kind, session));
    }

    /// First access: adopt a session from the confirmation-link fragment or
    /// from storage, then announce `InitialSession`.
    async fn restore(&self) {
        if self.restored.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(fragment) = browser::take_auth_fragment() {
            if let Some(description) = fragment_error(&fragment) {
                log::warn!("email confirmation link rejected: {description}");
            } else if let Some(tokens) = parse_fragment(&fragment) {
                match self.fetch_user(&tokens.access_token).await {
                    Ok(user) => {
                        let session = tokens.into_wire(user).into_session(browser::now_secs());
                        self.commit(AuthEventKind::SignedIn, Some(session));
                    }
                    Err(err) => log::warn!("could not load user for confirmation link: {err}"),
                }
            }
        }
        if self.snapshot().is_none() {
            if let Some(stored) = storage::load_json::<Session>(SESSION_STORAGE_KEY) {
                *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(stored);
            }
        }
        self.registry.emit(&AuthEvent::new(AuthEventKind::InitialSession, self.snapshot()));
    }

    async fn fetch_user(&self, access_token: &str) -> Result<WireUser, AuthError> {
        let url = auth_endpoint(&self.config, "user");
        let (status, body) = self.get(&url, access_token).await?;
        decode_response(status, &body)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let payload = encode_body(&RefreshGrant { refresh_token })?;
        let url = token_endpoint(&self.config, "refresh_token");
        let (status, body) = self.post(&url, payload, None).await?;
        let wire: WireSession = decode_response(status, &body)?;
        Ok(wire.into_session(browser::now_secs()))
    }

    /// Access token to revoke on sign-out. An expiring token is refreshed
    /// first; if that fails the session is already dead server-side and
    /// there is nothing to revoke.
    async fn revocable_token(&self, session: Session) -> Option<String> {
        if !session.needs_refresh(browser::now_secs()) {
            return Some(session.access_token);
        }
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => Some(fresh.access_token),
            Err(err) => {
                log::debug!("skipping remote sign-out, refresh failed: {err}");
                None
            }
        }
    }

    #[cfg(feature = "hydrate")]
    async fn send(
        &self,
        method: Method,
        url: &str,
        payload: Option<String>,
        bearer: Option<&str>,
    ) -> Result<(u16, String), AuthError> {
        use gloo_net::http::Request;

        let mut builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
        }
        .header("apikey", &self.config.key);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let request = match payload {
            Some(payload) => builder.header("Content-Type", "application/json").body(payload),
            None => builder.build(),
        }
        .map_err(|e| AuthError::Network(e.to_string()))?;
        let response = request.send().await.map_err(|e| AuthError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
        Ok((status, body))
    }

    /// Authenticated GET; hands back status and body.
    async fn get(&self, url: &str, bearer: &str) -> Result<(u16, String), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.send(Method::Get, url, None, Some(bearer)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, bearer);
            Err(AuthError::Unavailable)
        }
    }

    /// POST `payload` to `url`; hands back status and body.
    async fn post(&self, url: &str, payload: String, bearer: Option<&str>) -> Result<(u16, String), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.send(Method::Post, url, Some(payload), bearer).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (url, payload, bearer);
            Err(AuthError::Unavailable)
        }
    }
}

#[async_trait(?Send)]
impl SessionOracle for GoTrueOracle {
    async fn current_session(&self) -> Option<Session> {
        if self.ensure_configured().is_err() {
            return None;
        }
        self.restore().await;
        let session = self.snapshot()?;
        if !session.needs_refresh(browser::now_secs()) {
            return Some(session);
        }
        let (kind, session) = renewal(self.refresh(&session.refresh_token).await);
        self.commit(kind, session.clone());
        session
    }

    fn subscribe(&self, handler: EventHandler) -> Subscription {
        self.registry.subscribe(handler)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.ensure_configured()?;
        let payload = encode_body(&PasswordGrant { email, password })?;
        let url = token_endpoint(&self.config, "password");
        let (status, body) = self.post(&url, payload, None).await?;
        let wire: WireSession = decode_response(status, &body)?;
        let session = wire.into_session(browser::now_secs());
        self.commit(AuthEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, profile: &Profile) -> Result<SignUp, AuthError> {
        self.ensure_configured()?;
        let payload = encode_body(&SignUpRequest { email, password, data: profile })?;
        let url = auth_endpoint(&self.config, "signup");
        let (status, body) = self.post(&url, payload, None).await?;
        match decode_response::<SignUpResponse>(status, &body)? {
            SignUpResponse::Session(wire) => {
                let session = wire.into_session(browser::now_secs());
                self.commit(AuthEventKind::SignedIn, Some(session.clone()));
                Ok(SignUp::Session(session))
            }
            SignUpResponse::User(user) => Ok(SignUp::PendingConfirmation(user.into())),
        }
    }

    /// The local session is cleared and `SignedOut` emitted even when the
    /// remote revoke fails; that error is still returned.
    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = match self.snapshot() {
            Some(session) if self.config.is_valid() => self.revocable_token(session).await,
            _ => None,
        };
        let remote = match token {
            Some(token) => {
                let url = auth_endpoint(&self.config, "logout");
                match self.post(&url, String::from("{}"), Some(&token)).await {
                    Ok((status, body)) => expect_success(status, &body),
                    Err(err) => Err(err),
                }
            }
            None => Ok(()),
        };
        if let Err(err) = &remote {
            log::warn!("remote sign-out failed: {err}");
        }
        self.commit(AuthEventKind::SignedOut, None);
        remote
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.ensure_configured()?;
        let payload = encode_body(&ResendRequest { kind: "signup", email })?;
        let url = auth_endpoint(&self.config, "resend");
        let (status, body) = self.post(&url, payload, None).await?;
        expect_success(status, &body)
    }
}
