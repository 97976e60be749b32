use super::*;
use crate::auth::testing::{confirmed_session, unconfirmed_session};

#[test]
fn confirmed_redirect_only_for_confirmed_sessions() {
    assert_eq!(confirmed_redirect(None), None);
    assert_eq!(confirmed_redirect(Some(&unconfirmed_session("a@b.com"))), None);
    assert_eq!(confirmed_redirect(Some(&confirmed_session("a@b.com"))), Some(Redirect::dashboard()));
}

#[test]
fn state_waits_for_auth_to_load() {
    assert_eq!(verify_email_state(&AuthState::default(), Some("a@b.com")), PageState::Loading);
}

#[test]
fn state_is_ready_without_session_after_sign_up() {
    let state = verify_email_state(&AuthState::loaded(None), Some(" a@b.com "));
    assert_eq!(state, PageState::Ready(Some("a@b.com".to_owned())));
}

#[test]
fn blank_email_hides_resend_target() {
    let auth = AuthState::loaded(Some(unconfirmed_session("a@b.com")));
    assert_eq!(verify_email_state(&auth, Some("  ")), PageState::Ready(None));
    assert_eq!(verify_email_state(&auth, None), PageState::Ready(None));
}

#[test]
fn confirmed_session_stays_loading_while_redirecting() {
    let auth = AuthState::loaded(Some(confirmed_session("a@b.com")));
    assert!(verify_email_state(&auth, Some("a@b.com")).is_loading());
}
