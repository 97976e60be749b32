//! Route guard: decides whether a path may render for a given session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guard is a pure function shared by the root-level auth listener and
//! the page controllers, so every view gets the same answer to "is the user
//! allowed here". It never navigates itself; callers apply the returned
//! [`Redirect`] through the redirect latch.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::auth::session::Session;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// Paths reachable without a session. Matched by exact string equality, so
/// `/login/extra` is protected.
pub const PUBLIC_PATHS: [&str; 4] = [ROOT_PATH, LOGIN_PATH, REGISTER_PATH, VERIFY_EMAIL_PATH];

/// Query key carrying the originally requested path on a login redirect.
pub const REDIRECTED_FROM_KEY: &str = "redirectedFrom";
/// Query key carrying the address on a verify-email redirect.
pub const EMAIL_KEY: &str = "email";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if PUBLIC_PATHS.contains(&path) { RouteClass::Public } else { RouteClass::Protected }
}

// =============================================================================
// REDIRECT
// =============================================================================

/// Navigation target: a path plus ordered query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl Redirect {
    #[must_use]
    pub fn to(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: Vec::new() }
    }

    #[must_use]
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// `/login?redirectedFrom=<from>`.
    #[must_use]
    pub fn login(from: &str) -> Self {
        Self::to(LOGIN_PATH).with_query(REDIRECTED_FROM_KEY, from)
    }

    /// `/verify-email?email=<email>`.
    #[must_use]
    pub fn verify_email(email: &str) -> Self {
        Self::to(VERIFY_EMAIL_PATH).with_query(EMAIL_KEY, email)
    }

    #[must_use]
    pub fn dashboard() -> Self {
        Self::to(DASHBOARD_PATH)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    /// Render as an href with percent-encoded query values.
    #[must_use]
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_query_value(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// `/` is legal inside a query component and stays literal.
fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).replace("%2F", "/")
}

// =============================================================================
// DECISION
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Redirect),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Allow => None,
            Self::Redirect(target) => Some(target),
        }
    }
}

/// Whether the guard enforces access rules or lets every path render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardMode {
    #[default]
    Enforce,
    Bypass,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteGuard {
    mode: GuardMode,
}

impl RouteGuard {
    #[must_use]
    pub const fn new(mode: GuardMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(self) -> GuardMode {
        self.mode
    }

    #[must_use]
    pub fn decide(self, path: &str, session: Option<&Session>) -> GuardDecision {
        match self.mode {
            GuardMode::Enforce => decide(path, session),
            GuardMode::Bypass => GuardDecision::Allow,
        }
    }
}

/// Enforcing decision for `path` given the current session.
///
/// 1. public path: allow, even without a session
/// 2. no session: redirect to `/login?redirectedFrom=<path>`
/// 3. unconfirmed email: redirect to `/verify-email?email=<email>`
/// 4. otherwise allow
#[must_use]
pub fn decide(path: &str, session: Option<&Session>) -> GuardDecision {
    if classify(path) == RouteClass::Public {
        return GuardDecision::Allow;
    }
    let Some(session) = session else {
        return GuardDecision::Redirect(Redirect::login(path));
    };
    if !session.is_confirmed() {
        return GuardDecision::Redirect(Redirect::verify_email(session.email()));
    }
    GuardDecision::Allow
}

/// Accept a `redirectedFrom` value only when it names a protected path on
/// this origin that is worth returning to.
///
/// Browsers drop tabs and line breaks while parsing a URL, so `/\t/host`
/// would navigate to `//host`; any control or whitespace character is
/// rejected outright.
#[must_use]
pub fn sanitize_redirected_from(raw: Option<&str>) -> Option<&str> {
    let path = raw?.trim();
    if path.chars().any(|c| c.is_ascii_control() || c.is_whitespace()) {
        return None;
    }
    let same_origin = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    (same_origin && classify(path) == RouteClass::Protected && path != LOGOUT_PATH).then_some(path)
}

/// Where a freshly confirmed session lands after signing in.
#[must_use]
pub fn post_login_target(redirected_from: Option<&str>) -> Redirect {
    sanitize_redirected_from(redirected_from).map_or_else(Redirect::dashboard, Redirect::to)
}
