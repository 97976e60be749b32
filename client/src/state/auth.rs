//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` by the root component. The app-wide auth
//! guard writes it from oracle events; pages read it to decide between their
//! loading and ready states.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::auth::session::{AuthEvent, Session, User};

/// Current session plus whether the first lookup is still outstanding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn loaded(session: Option<Session>) -> Self {
        Self { session, loading: false }
    }

    /// Every event, `InitialSession` included, carries the authoritative
    /// session and ends the loading phase.
    pub fn apply(&mut self, event: &AuthEvent) {
        self.session.clone_from(&event.session);
        self.loading = false;
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_confirmed)
    }
}
