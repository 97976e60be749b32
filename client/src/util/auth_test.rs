use std::cell::RefCell;

use super::*;
use crate::auth::guard::{GuardMode, Redirect};
use crate::auth::navigator::{RedirectLatch, apply_redirect};
use crate::config::GuardPolicy;

fn navigator_at<'a>(
    path: &str,
    visits: &'a RefCell<Vec<String>>,
) -> RouterNavigator<impl Fn(&str, NavigateOptions) + 'a> {
    RouterNavigator {
        navigate: move |href: &str, _: NavigateOptions| visits.borrow_mut().push(href.to_owned()),
        path: path.to_owned(),
        query: ParamsMap::default(),
    }
}

#[test]
fn router_navigator_reports_snapshot_path_and_forwards_hrefs() {
    let visits = RefCell::new(Vec::new());
    let navigator = navigator_at("/dashboard", &visits);
    assert_eq!(navigator.current_path(), "/dashboard");
    assert_eq!(navigator.query_value("redirectedFrom"), None);

    let latch = RedirectLatch::new();
    assert!(apply_redirect(&latch, &navigator, &Redirect::login("/dashboard")));
    assert_eq!(visits.borrow().as_slice(), ["/login?redirectedFrom=/dashboard"]);
}

#[test]
fn services_take_guard_mode_from_config() {
    let oracle: Arc<dyn SessionOracle> = Arc::new(crate::auth::testing::FakeOracle::new());

    let unconfigured = AuthServices::new(AuthConfig::default(), Arc::clone(&oracle));
    assert_eq!(unconfigured.guard().mode(), GuardMode::Bypass);

    let closed = AuthConfig { policy: GuardPolicy::FailClosed, ..AuthConfig::default() };
    let services = AuthServices::new(closed, oracle);
    assert_eq!(services.guard().mode(), GuardMode::Enforce);
}

#[test]
fn liveness_starts_alive_and_retires_for_every_clone() {
    let liveness = Liveness::new();
    let task_copy = liveness.clone();
    assert!(task_copy.is_alive());
    liveness.retire();
    assert!(!task_copy.is_alive());
}

#[test]
fn session_check_waits_until_refresh_margin_with_retry_floor() {
    let session = Session { expires_at: 1_000, ..crate::auth::testing::confirmed_session("a@b.com") };
    let margin = crate::auth::session::EXPIRY_MARGIN_SECS;
    assert_eq!(next_session_check(Some(&session), 1_000 - margin - 30), Duration::from_secs(30));
    assert_eq!(next_session_check(Some(&session), 1_000), SESSION_RETRY);
}

#[test]
fn session_check_is_capped_by_poll_interval() {
    let long_lived = crate::auth::testing::confirmed_session("a@b.com");
    assert_eq!(next_session_check(Some(&long_lived), 0), SESSION_POLL);
    assert_eq!(next_session_check(None, 0), SESSION_POLL);
}
