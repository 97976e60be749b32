//! Resend-confirmation action with an in-flight gate.
//!
//! While one resend is outstanding further clicks are ignored rather than
//! queued. The gate is claimed synchronously in the click handler, before any
//! task is spawned, so two clicks in the same tick cannot both get through.

#[cfg(test)]
#[path = "resend_test.rs"]
mod resend_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::error::AuthError;
use crate::auth::oracle::SessionOracle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    Failed(String),
    /// Another resend was still in flight.
    Ignored,
    /// No address to send to.
    MissingEmail,
}

impl ResendOutcome {
    /// Text for the blocking notification, if the outcome warrants one.
    #[must_use]
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Sent => Some("Confirmation email sent again. Please check your inbox.".to_owned()),
            Self::Failed(message) => Some(message.clone()),
            Self::Ignored | Self::MissingEmail => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResendGate {
    in_flight: Arc<AtomicBool>,
}

impl ResendGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the gate; `None` while another resend is outstanding.
    #[must_use]
    pub fn try_begin(&self) -> Option<ResendTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ResendTicket { in_flight: Arc::clone(&self.in_flight) })
    }

    pub async fn run(&self, oracle: &dyn SessionOracle, email: &str) -> ResendOutcome {
        if email.trim().is_empty() {
            return ResendOutcome::MissingEmail;
        }
        let Some(ticket) = self.try_begin() else {
            return ResendOutcome::Ignored;
        };
        ticket.send(oracle, email).await
    }
}

/// Proof of holding the gate. Dropping it re-opens the gate.
#[derive(Debug)]
pub struct ResendTicket {
    in_flight: Arc<AtomicBool>,
}

impl ResendTicket {
    pub async fn send(self, oracle: &dyn SessionOracle, email: &str) -> ResendOutcome {
        let email = email.trim();
        if email.is_empty() {
            return ResendOutcome::MissingEmail;
        }
        match oracle.resend_confirmation(email).await {
            Ok(()) => ResendOutcome::Sent,
            Err(err) => {
                log::warn!("resend confirmation failed: {err}");
                ResendOutcome::Failed(resend_failure_message(&err))
            }
        }
    }
}

impl Drop for ResendTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

fn resend_failure_message(err: &AuthError) -> String {
    match err {
        AuthError::Provider { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => "Could not resend the confirmation email. Please try again.".to_owned(),
    }
}
