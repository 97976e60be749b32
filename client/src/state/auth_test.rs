use super::*;
use crate::auth::session::AuthEventKind;
use crate::auth::testing::{confirmed_session, unconfirmed_session};

#[test]
fn default_state_is_loading_without_session() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user().is_none());
    assert!(!state.is_confirmed());
}

#[test]
fn apply_replaces_session_and_finishes_loading() {
    let mut state = AuthState::default();
    state.apply(&AuthEvent::new(AuthEventKind::InitialSession, Some(unconfirmed_session("a@b.com"))));
    assert!(!state.loading);
    assert_eq!(state.user().map(|user| user.email.as_str()), Some("a@b.com"));
    assert!(!state.is_confirmed());

    state.apply(&AuthEvent::new(AuthEventKind::SignedIn, Some(confirmed_session("a@b.com"))));
    assert!(state.is_confirmed());

    state.apply(&AuthEvent::signed_out());
    assert_eq!(state, AuthState::loaded(None));
}
