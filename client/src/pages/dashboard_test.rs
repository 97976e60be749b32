use super::*;
use crate::auth::guard::GuardMode;
use crate::auth::testing::{FakeOracle, confirmed_session, unconfirmed_session};

fn enforce() -> RouteGuard {
    RouteGuard::new(GuardMode::Enforce)
}

#[test]
fn loading_until_auth_state_loads() {
    assert_eq!(dashboard_state(&AuthState::default(), enforce(), None), PageState::Loading);
}

#[test]
fn stays_loading_while_guard_redirects() {
    assert!(dashboard_state(&AuthState::loaded(None), enforce(), None).is_loading());
    let unconfirmed = AuthState::loaded(Some(unconfirmed_session("a@b.com")));
    assert!(dashboard_state(&unconfirmed, enforce(), None).is_loading());
}

#[test]
fn ready_with_confirmed_user() {
    let auth = AuthState::loaded(Some(confirmed_session("a@b.com")));
    let state = dashboard_state(&auth, enforce(), None);
    assert_eq!(state.ready().and_then(Option::as_ref).map(|user| user.email.as_str()), Some("a@b.com"));
}

#[test]
fn bypassed_guard_renders_without_user() {
    let state = dashboard_state(&AuthState::loaded(None), RouteGuard::new(GuardMode::Bypass), None);
    assert_eq!(state, PageState::Ready(None));
}

#[test]
fn failure_wins_over_other_states() {
    let state = dashboard_state(&AuthState::default(), enforce(), Some("Sign out failed"));
    assert_eq!(state.error(), Some("Sign out failed"));
}

#[test]
fn format_timestamp_trims_to_minutes() {
    assert_eq!(format_timestamp("2024-05-01T09:30:00.000000Z"), "2024-05-01 09:30");
    assert_eq!(format_timestamp("2024-05-01T09:3"), "2024-05-01 09:3");
    assert_eq!(format_timestamp("yesterday"), "yesterday");
}

#[tokio::test]
async fn sign_out_goes_to_login() {
    let oracle = FakeOracle::new().with_session(confirmed_session("a@b.com"));
    let target = submit_sign_out(&oracle).await.unwrap();
    assert_eq!(target.href(), "/login");
    assert_eq!(oracle.session(), None);
}

#[tokio::test]
async fn sign_out_failure_still_clears_session() {
    let oracle = FakeOracle::new()
        .with_session(confirmed_session("a@b.com"))
        .with_sign_out(Err(AuthError::Network("offline".to_owned())));
    let err = submit_sign_out(&oracle).await.unwrap_err();
    assert_eq!(err, AuthError::Network("offline".to_owned()));
    assert_eq!(oracle.session(), None);
}
