use super::*;
use crate::auth::testing::{FakeOracle, confirmed_session};

#[test]
fn success_redirects_after_one_second() {
    let status = logout_status(&Ok(()));
    assert_eq!(status.delay, Duration::from_secs(1));
    assert_eq!(status.message, "You have been signed out.");
}

#[test]
fn failure_redirects_after_two_seconds() {
    let status = logout_status(&Err(AuthError::Network("offline".to_owned())));
    assert_eq!(status.delay, Duration::from_secs(2));
}

#[tokio::test]
async fn perform_logout_clears_session() {
    let oracle = FakeOracle::new().with_session(confirmed_session("a@b.com"));
    let status = perform_logout(&oracle).await;
    assert_eq!(status.delay, SUCCESS_DELAY);
    assert_eq!(oracle.session(), None);
}

#[tokio::test]
async fn perform_logout_reports_remote_failure() {
    let oracle = FakeOracle::new()
        .with_session(confirmed_session("a@b.com"))
        .with_sign_out(Err(AuthError::Provider { status: 500, message: "down".to_owned() }));
    let status = perform_logout(&oracle).await;
    assert_eq!(status.delay, FAILURE_DELAY);
    assert_eq!(oracle.session(), None);
}
