//! Session oracle seam and the subscriber registry behind its event stream.
//!
//! SYSTEM CONTEXT
//! ==============
//! All authentication work is delegated to an external service. The UI only
//! talks to it through [`SessionOracle`], which the root component provides
//! as context; tests substitute an in-memory implementation.

#[cfg(test)]
#[path = "oracle_test.rs"]
mod oracle_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::error::AuthError;
use crate::auth::session::{AuthEvent, Session, User};

/// Callback invoked for every auth event.
pub type EventHandler = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Profile fields stored with a new account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
}

/// Result of a sign-up: projects without email confirmation hand back a
/// session right away, others a user whose confirmation is pending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignUp {
    Session(Session),
    PendingConfirmation(User),
}

impl SignUp {
    #[must_use]
    pub fn user(&self) -> &User {
        match self {
            Self::Session(session) => &session.user,
            Self::PendingConfirmation(user) => user,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Session(session) => Some(session),
            Self::PendingConfirmation(_) => None,
        }
    }
}

/// External authentication provider.
///
/// Futures are not `Send`: browser HTTP futures are bound to the UI thread.
#[async_trait(?Send)]
pub trait SessionOracle: Send + Sync {
    /// Current session, refreshed first when it is about to expire.
    async fn current_session(&self) -> Option<Session>;

    /// Register `handler` for auth events until the returned handle is
    /// released.
    fn subscribe(&self, handler: EventHandler) -> Subscription;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_up(&self, email: &str, password: &str, profile: &Profile) -> Result<SignUp, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Send the sign-up confirmation email again.
    async fn resend_confirmation(&self, email: &str) -> Result<(), AuthError>;
}

// =============================================================================
// SUBSCRIBERS
// =============================================================================

#[derive(Default)]
struct Handlers {
    next_id: u64,
    entries: Vec<(u64, EventHandler)>,
}

/// Fan-out list of event handlers shared by oracle implementations.
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    handlers: Arc<Mutex<Handlers>>,
}

impl SubscriberRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: EventHandler) -> Subscription {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let id = handlers.next_id;
        handlers.next_id += 1;
        handlers.entries.push((id, handler));
        Subscription { handlers: Arc::downgrade(&self.handlers), id, active: true }
    }

    /// Deliver `event` to every current subscriber. Handlers run outside the
    /// lock so they may subscribe or unsubscribe re-entrantly.
    pub fn emit(&self, event: &AuthEvent) {
        let snapshot: Vec<EventHandler> = {
            let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
            handlers.entries.iter().map(|(_, handler)| Arc::clone(handler)).collect()
        };
        for handler in snapshot {
            handler(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for one registered handler. Released exactly once: by
/// [`Subscription::unsubscribe`] or on drop, whichever comes first.
pub struct Subscription {
    handlers: Weak<Mutex<Handlers>>,
    id: u64,
    active: bool,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(handlers) = self.handlers.upgrade() {
            let mut handlers = handlers.lock().unwrap_or_else(PoisonError::into_inner);
            handlers.entries.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
