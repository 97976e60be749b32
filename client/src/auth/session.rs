//! Session and auth-event values handed out by the session oracle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and the route guard only ever read these values. They are built by
//! decoding auth-service responses (`net::types`) or restored from browser
//! storage; nothing in the UI constructs or mutates a session directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a stored session is refreshed.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Identity attached to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// RFC 3339 timestamp set once the address has been confirmed.
    pub email_confirmed_at: Option<String>,
    pub created_at: Option<String>,
    /// Display name captured at registration.
    pub name: Option<String>,
}

impl User {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.as_deref().is_some_and(|at| !at.trim().is_empty())
    }
}

/// Authenticated session: tokens plus the user they belong to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as seconds since the Unix epoch.
    pub expires_at: i64,
    pub user: User,
}

impl Session {
    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.user.is_confirmed()
    }

    /// True once the session is within [`EXPIRY_MARGIN_SECS`] of expiring.
    #[must_use]
    pub fn needs_refresh(&self, now_secs: i64) -> bool {
        self.expires_at.saturating_sub(now_secs) <= EXPIRY_MARGIN_SECS
    }

    /// Time left until [`Self::needs_refresh`] turns true; zero once it has.
    #[must_use]
    pub fn refresh_delay(&self, now_secs: i64) -> Duration {
        let secs = self.expires_at.saturating_sub(EXPIRY_MARGIN_SECS).saturating_sub(now_secs);
        Duration::from_secs(u64::try_from(secs).unwrap_or(0))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Session lifecycle transition reported by the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        }
    }
}

impl fmt::Display for AuthEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<Session>,
}

impl AuthEvent {
    #[must_use]
    pub fn new(kind: AuthEventKind, session: Option<Session>) -> Self {
        Self { kind, session }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::new(AuthEventKind::SignedOut, None)
    }

    /// Email of the event's session, for logging.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().map(Session::email)
    }
}
