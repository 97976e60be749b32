//! Navigation seam and the redirect latch.
//!
//! DESIGN
//! ======
//! Several actors can decide to redirect while one page is displayed: the
//! mount-time check, auth events, and the page's own submit handlers. The
//! latch lets only the first of them navigate; later decisions for the same
//! displayed path are evaluated but become no-ops. The latch re-opens as soon
//! as the router reports a different path.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::sync::{Mutex, PoisonError};

use crate::auth::guard::Redirect;

/// Router operations the auth layer needs.
pub trait Navigator {
    /// Path currently displayed, without query string.
    fn current_path(&self) -> String;

    /// Query parameter of the current location.
    fn query_value(&self, key: &str) -> Option<String> {
        let _ = key;
        None
    }

    fn navigate(&self, href: &str);
}

/// First-decision-wins gate keyed by the displayed path.
#[derive(Debug, Default)]
pub struct RedirectLatch {
    armed_on: Mutex<Option<String>>,
}

impl RedirectLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the latch for `path`. Returns `false` when a redirect already
    /// happened while `path` was displayed.
    pub fn try_arm(&self, path: &str) -> bool {
        let mut armed = self.armed_on.lock().unwrap_or_else(PoisonError::into_inner);
        if armed.as_deref() == Some(path) {
            return false;
        }
        *armed = Some(path.to_owned());
        true
    }

    /// Re-open the latch once the router displays a path other than the one
    /// it was armed on.
    pub fn observe_path(&self, path: &str) {
        let mut armed = self.armed_on.lock().unwrap_or_else(PoisonError::into_inner);
        if armed.as_deref().is_some_and(|armed_path| armed_path != path) {
            *armed = None;
        }
    }

    #[must_use]
    pub fn is_armed_on(&self, path: &str) -> bool {
        self.armed_on.lock().unwrap_or_else(PoisonError::into_inner).as_deref() == Some(path)
    }
}

/// Navigate to `target` unless it is already displayed or the latch is held.
/// Returns whether a navigation was issued.
pub fn apply_redirect(latch: &RedirectLatch, navigator: &dyn Navigator, target: &Redirect) -> bool {
    let current = navigator.current_path();
    if target.path() == current {
        return false;
    }
    if !latch.try_arm(&current) {
        log::debug!("redirect to {} suppressed; already redirected from {current}", target.path());
        return false;
    }
    let href = target.href();
    log::debug!("redirecting {current} -> {href}");
    navigator.navigate(&href);
    true
}
