//! Leptos wiring for the auth core.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root component provides [`AuthServices`] and an `RwSignal<AuthState>`
//! as context and mounts one [`AuthGuard`] inside the router. The guard holds
//! the app-wide oracle subscription, mirrors events into the auth signal, and
//! drives the [`AuthListener`] from two effects: one for route changes and
//! the initial load, one for auth events.
//!
//! The oracle handler only writes signals. Navigation happens inside effects,
//! where the router's `navigate` closure is available.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::location::Location;
use leptos_router::params::ParamsMap;

use crate::auth::guard::{Redirect, RouteGuard};
use crate::auth::listener::AuthListener;
use crate::auth::navigator::Navigator;
use crate::auth::oracle::SessionOracle;
use crate::auth::session::{AuthEvent, Session};
use crate::config::AuthConfig;
use crate::state::auth::AuthState;

/// Auth collaborators shared through context.
#[derive(Clone)]
pub struct AuthServices {
    pub oracle: Arc<dyn SessionOracle>,
    pub listener: Arc<AuthListener>,
    pub config: AuthConfig,
}

impl AuthServices {
    #[must_use]
    pub fn new(config: AuthConfig, oracle: Arc<dyn SessionOracle>) -> Self {
        let guard = RouteGuard::new(config.guard_mode());
        Self { oracle, listener: Arc::new(AuthListener::new(guard)), config }
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        self.listener.guard()
    }
}

pub fn use_auth_services() -> AuthServices {
    expect_context::<AuthServices>()
}

pub fn use_auth_state() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}

/// Page-side navigation through the app-wide redirect latch, so a submit
/// handler and an auth event cannot both navigate away from the same page.
pub fn use_redirect() -> impl Fn(&Redirect) -> bool + Clone + 'static {
    let listener = use_auth_services().listener;
    let location = use_location();
    let navigate = use_navigate();
    move |target: &Redirect| {
        let navigator = RouterNavigator::snapshot(&navigate, &location);
        listener.redirect(target, &navigator)
    }
}

/// [`Navigator`] over the router's `navigate` closure and a location snapshot.
pub struct RouterNavigator<F> {
    navigate: F,
    path: String,
    query: ParamsMap,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    /// Capture the displayed location without subscribing to it.
    pub fn snapshot(navigate: F, location: &Location) -> Self {
        Self { navigate, path: location.pathname.get_untracked(), query: location.query.get_untracked() }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn query_value(&self, key: &str) -> Option<String> {
        self.query.get(key)
    }

    fn navigate(&self, href: &str) {
        (self.navigate)(href, NavigateOptions::default());
    }
}

/// Upper bound between session checks, so a sign-in made after the last
/// check is still refreshed in time.
pub const SESSION_POLL: Duration = Duration::from_secs(60);

/// Lower bound, so a service handing out already-expiring tokens is not
/// polled in a tight loop.
pub const SESSION_RETRY: Duration = Duration::from_secs(1);

/// Wait before the next session check: until the refresh margin, clamped to
/// [`SESSION_RETRY`]..=[`SESSION_POLL`].
#[must_use]
pub fn next_session_check(session: Option<&Session>, now_secs: i64) -> Duration {
    session.map_or(SESSION_POLL, |session| session.refresh_delay(now_secs).clamp(SESSION_RETRY, SESSION_POLL))
}

/// Flag cleared when the owning component unmounts. Async work started by a
/// page checks it before writing state or navigating.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// New flag tied to the current reactive owner.
    #[must_use]
    pub fn mount() -> Self {
        let liveness = Self::new();
        let on_unmount = liveness.clone();
        on_cleanup(move || on_unmount.retire());
        liveness
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn retire(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// App-wide route guard. Renders nothing.
#[component]
pub fn AuthGuard() -> impl IntoView {
    let services = use_auth_services();
    let auth = use_auth_state();
    let location = use_location();
    let navigate = use_navigate();
    // Events emitted in one tick (e.g. `SignedIn` then `InitialSession`)
    // are queued so the effect sees each of them.
    let pending = RwSignal::new(Vec::<AuthEvent>::new());

    let subscription = services.oracle.subscribe(Arc::new(move |event: &AuthEvent| {
        auth.update(|state| state.apply(event));
        pending.update(|events| events.push(event.clone()));
    }));
    on_cleanup(move || subscription.unsubscribe());

    // Initial load, then re-query the oracle just before the session needs
    // a refresh. `current_session` performs the refresh and emits
    // `TokenRefreshed` or `SignedOut`.
    #[cfg(feature = "hydrate")]
    {
        let oracle = Arc::clone(&services.oracle);
        let alive = Liveness::mount();
        leptos::task::spawn_local(async move {
            let mut session = oracle.current_session().await;
            auth.set(AuthState::loaded(session.clone()));
            while alive.is_alive() {
                let now = crate::util::browser::now_secs();
                gloo_timers::future::sleep(next_session_check(session.as_ref(), now)).await;
                if !alive.is_alive() {
                    break;
                }
                session = oracle.current_session().await;
            }
        });
    }

    // Mount-time check: re-runs when the route changes or loading finishes.
    let loading = Memo::new(move |_| auth.with(|state| state.loading));
    let listener = Arc::clone(&services.listener);
    let mount_navigate = navigate.clone();
    let mount_location = location.clone();
    Effect::new(move || {
        let path = mount_location.pathname.get();
        listener.latch().observe_path(&path);
        if loading.get() {
            return;
        }
        let session = auth.with_untracked(|state| state.session.clone());
        let navigator = RouterNavigator::snapshot(&mount_navigate, &mount_location);
        listener.check(session.as_ref(), &navigator);
    });

    let listener = Arc::clone(&services.listener);
    Effect::new(move || {
        pending.track();
        let events = pending.try_update_untracked(std::mem::take).unwrap_or_default();
        for event in &events {
            let navigator = RouterNavigator::snapshot(&navigate, &location);
            listener.handle(event, &navigator);
        }
    });
}
