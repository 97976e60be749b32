//! Auth event listener: re-runs the route guard on session transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! One listener is installed by the root component for the lifetime of the
//! app. The mount-time check ([`AuthListener::check`]) and event delivery
//! ([`AuthListener::handle`]) race on every page load; both go through the
//! same [`RedirectLatch`], so whichever arrives first navigates and the other
//! becomes a no-op.

#[cfg(test)]
#[path = "listener_test.rs"]
mod listener_test;

use std::sync::Arc;

use crate::auth::guard::{
    GuardDecision, REDIRECTED_FROM_KEY, Redirect, RouteClass, RouteGuard, classify, post_login_target,
};
use crate::auth::navigator::{Navigator, RedirectLatch, apply_redirect};
use crate::auth::oracle::{SessionOracle, Subscription};
use crate::auth::session::{AuthEvent, AuthEventKind, Session};

pub struct AuthListener {
    guard: RouteGuard,
    latch: Arc<RedirectLatch>,
}

impl AuthListener {
    #[must_use]
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard, latch: Arc::new(RedirectLatch::new()) }
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        self.guard
    }

    #[must_use]
    pub fn latch(&self) -> &RedirectLatch {
        &self.latch
    }

    /// Mount-time decision for the displayed path.
    pub fn check(&self, session: Option<&Session>, navigator: &dyn Navigator) -> Option<Redirect> {
        let path = navigator.current_path();
        match self.guard.decide(&path, session) {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(target) => self.redirect(&target, navigator).then_some(target),
        }
    }

    /// React to one auth event. `InitialSession` is ignored because the
    /// mount-time check already covers it. Returns the redirect that was
    /// applied, if any.
    pub fn handle(&self, event: &AuthEvent, navigator: &dyn Navigator) -> Option<Redirect> {
        if event.kind == AuthEventKind::InitialSession {
            return None;
        }
        log::debug!("auth event {} ({})", event.kind, event.email().unwrap_or("no session"));

        let path = navigator.current_path();
        let target = match self.guard.decide(&path, event.session.as_ref()) {
            GuardDecision::Redirect(target) => target,
            GuardDecision::Allow => forward_after_sign_in(event, &path, navigator)?,
        };
        self.redirect(&target, navigator).then_some(target)
    }

    /// Navigate through the shared latch. Pages use this for their own
    /// post-submit navigation so it cannot double up with event redirects.
    pub fn redirect(&self, target: &Redirect, navigator: &dyn Navigator) -> bool {
        apply_redirect(&self.latch, navigator, target)
    }

    /// Subscribe to `oracle` and apply every event through `navigator` until
    /// the returned handle is released.
    pub fn attach(
        self: &Arc<Self>,
        oracle: &dyn SessionOracle,
        navigator: Arc<dyn Navigator + Send + Sync>,
    ) -> Subscription {
        let listener = Arc::clone(self);
        oracle.subscribe(Arc::new(move |event: &AuthEvent| {
            listener.handle(event, navigator.as_ref());
        }))
    }
}

/// A confirmed sign-in while a public page is displayed moves on to the
/// post-login target.
fn forward_after_sign_in(event: &AuthEvent, path: &str, navigator: &dyn Navigator) -> Option<Redirect> {
    if event.kind != AuthEventKind::SignedIn || classify(path) != RouteClass::Public {
        return None;
    }
    if !event.session.as_ref().is_some_and(Session::is_confirmed) {
        return None;
    }
    let redirected_from = navigator.query_value(REDIRECTED_FROM_KEY);
    Some(post_login_target(redirected_from.as_deref()))
}
