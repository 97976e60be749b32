//! In-memory oracle and navigator doubles shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::error::AuthError;
use crate::auth::navigator::Navigator;
use crate::auth::oracle::{EventHandler, Profile, SessionOracle, SignUp, SubscriberRegistry, Subscription};
use crate::auth::session::{AuthEvent, AuthEventKind, Session, User};

pub(crate) fn user(email: &str, confirmed_at: Option<&str>) -> User {
    User {
        id: "0b6a2c1e-7f43-4d5e-9a10-3c2f8e9d4b21".to_owned(),
        email: email.to_owned(),
        email_confirmed_at: confirmed_at.map(str::to_owned),
        created_at: Some("2024-05-01T09:30:00.000000Z".to_owned()),
        name: Some("Hanako".to_owned()),
    }
}

pub(crate) fn confirmed_session(email: &str) -> Session {
    Session {
        access_token: "access".to_owned(),
        refresh_token: "refresh".to_owned(),
        expires_at: i64::MAX,
        user: user(email, Some("2024-05-01T10:00:00Z")),
    }
}

pub(crate) fn unconfirmed_session(email: &str) -> Session {
    Session { user: user(email, None), ..confirmed_session(email) }
}

// =============================================================================
// FAKE ORACLE
// =============================================================================

pub(crate) struct FakeOracle {
    session: Mutex<Option<Session>>,
    registry: SubscriberRegistry,
    sign_in: Mutex<Result<Session, AuthError>>,
    sign_up: Mutex<Result<SignUp, AuthError>>,
    sign_out: Mutex<Result<(), AuthError>>,
    resend: Mutex<Result<(), AuthError>>,
    sign_in_requests: Mutex<Vec<String>>,
    sign_up_requests: Mutex<Vec<(String, Profile)>>,
    resend_requests: Mutex<Vec<String>>,
}

impl FakeOracle {
    pub(crate) fn new() -> Self {
        let rejected = || AuthError::Provider { status: 400, message: "Invalid login credentials".to_owned() };
        Self {
            session: Mutex::new(None),
            registry: SubscriberRegistry::new(),
            sign_in: Mutex::new(Err(rejected())),
            sign_up: Mutex::new(Err(rejected())),
            sign_out: Mutex::new(Ok(())),
            resend: Mutex::new(Ok(())),
            sign_in_requests: Mutex::new(Vec::new()),
            sign_up_requests: Mutex::new(Vec::new()),
            resend_requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_session(self, session: Session) -> Self {
        *self.session.lock().unwrap() = Some(session);
        self
    }

    pub(crate) fn with_sign_in(self, result: Result<Session, AuthError>) -> Self {
        *self.sign_in.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_sign_up(self, result: Result<SignUp, AuthError>) -> Self {
        *self.sign_up.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_sign_out(self, result: Result<(), AuthError>) -> Self {
        *self.sign_out.lock().unwrap() = result;
        self
    }

    pub(crate) fn with_resend(self, result: Result<(), AuthError>) -> Self {
        *self.resend.lock().unwrap() = result;
        self
    }

    pub(crate) fn emit(&self, event: &AuthEvent) {
        self.registry.emit(event);
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub(crate) fn sign_in_requests(&self) -> Vec<String> {
        self.sign_in_requests.lock().unwrap().clone()
    }

    pub(crate) fn sign_up_requests(&self) -> Vec<(String, Profile)> {
        self.sign_up_requests.lock().unwrap().clone()
    }

    pub(crate) fn resend_requests(&self) -> Vec<String> {
        self.resend_requests.lock().unwrap().clone()
    }

    fn commit(&self, kind: AuthEventKind, session: Option<Session>) {
        self.session.lock().unwrap().clone_from(&session);
        self.registry.emit(&AuthEvent::new(kind, session));
    }
}

#[async_trait(?Send)]
impl SessionOracle for FakeOracle {
    async fn current_session(&self) -> Option<Session> {
        self.session()
    }

    fn subscribe(&self, handler: EventHandler) -> Subscription {
        self.registry.subscribe(handler)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        self.sign_in_requests.lock().unwrap().push(email.to_owned());
        let result = self.sign_in.lock().unwrap().clone();
        if let Ok(session) = &result {
            self.commit(AuthEventKind::SignedIn, Some(session.clone()));
        }
        result
    }

    async fn sign_up(&self, email: &str, _password: &str, profile: &Profile) -> Result<SignUp, AuthError> {
        self.sign_up_requests.lock().unwrap().push((email.to_owned(), profile.clone()));
        let result = self.sign_up.lock().unwrap().clone();
        if let Ok(SignUp::Session(session)) = &result {
            self.commit(AuthEventKind::SignedIn, Some(session.clone()));
        }
        result
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.commit(AuthEventKind::SignedOut, None);
        self.sign_out.lock().unwrap().clone()
    }

    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError> {
        self.resend_requests.lock().unwrap().push(email.to_owned());
        self.resend.lock().unwrap().clone()
    }
}

// =============================================================================
// RECORDING NAVIGATOR
// =============================================================================

/// Records every navigation. A `following` navigator also moves its current
/// path to the target, like a router that completes navigation immediately.
pub(crate) struct RecordingNavigator {
    path: Mutex<String>,
    query: Vec<(String, String)>,
    follow: bool,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn at(path: &str) -> Self {
        Self { path: Mutex::new(path.to_owned()), query: Vec::new(), follow: false, visits: Mutex::new(Vec::new()) }
    }

    pub(crate) fn following(path: &str) -> Self {
        Self { follow: true, ..Self::at(path) }
    }

    pub(crate) fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    pub(crate) fn set_path(&self, path: &str) {
        *self.path.lock().unwrap() = path.to_owned();
    }

    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn query_value(&self, key: &str) -> Option<String> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    fn navigate(&self, href: &str) {
        self.visits.lock().unwrap().push(href.to_owned());
        if self.follow {
            let path = href.split('?').next().unwrap_or(href);
            self.set_path(path);
        }
    }
}
