use super::*;
use crate::auth::error::AuthError;
use crate::auth::testing::FakeOracle;

#[tokio::test]
async fn resend_reports_success() {
    let oracle = FakeOracle::new();
    let gate = ResendGate::new();

    let outcome = gate.run(&oracle, "a@b.com").await;

    assert_eq!(outcome, ResendOutcome::Sent);
    assert_eq!(oracle.resend_requests(), vec!["a@b.com".to_owned()]);
    assert!(!gate.is_pending());
}

#[tokio::test]
async fn second_invocation_while_pending_is_ignored() {
    let oracle = FakeOracle::new();
    let gate = ResendGate::new();

    let pending = gate.try_begin().expect("gate open");
    assert!(gate.is_pending());

    let second = gate.run(&oracle, "a@b.com").await;
    assert_eq!(second, ResendOutcome::Ignored);
    assert!(gate.try_begin().is_none());
    assert!(oracle.resend_requests().is_empty());

    let first = pending.send(&oracle, "a@b.com").await;
    assert_eq!(first, ResendOutcome::Sent);
    assert_eq!(oracle.resend_requests().len(), 1);
    assert!(!gate.is_pending());
}

#[tokio::test]
async fn gate_reopens_after_failure() {
    let oracle = FakeOracle::new().with_resend(Err(AuthError::Provider {
        status: 429,
        message: "For security purposes, you can only request this once every 60 seconds".to_owned(),
    }));
    let gate = ResendGate::new();

    let outcome = gate.run(&oracle, "a@b.com").await;

    assert_eq!(
        outcome.notification().as_deref(),
        Some("For security purposes, you can only request this once every 60 seconds")
    );
    assert!(gate.try_begin().is_some());
}

#[tokio::test]
async fn transport_failure_uses_generic_message() {
    let oracle = FakeOracle::new().with_resend(Err(AuthError::Network("offline".to_owned())));
    let outcome = ResendGate::new().run(&oracle, "a@b.com").await;
    assert_eq!(
        outcome,
        ResendOutcome::Failed("Could not resend the confirmation email. Please try again.".to_owned())
    );
}

#[tokio::test]
async fn empty_email_is_a_no_op() {
    let oracle = FakeOracle::new();
    let gate = ResendGate::new();
    assert_eq!(gate.run(&oracle, "   ").await, ResendOutcome::MissingEmail);
    assert!(oracle.resend_requests().is_empty());
    assert!(!gate.is_pending());
}

#[test]
fn ignored_outcome_has_no_notification() {
    assert_eq!(ResendOutcome::Ignored.notification(), None);
    assert!(ResendOutcome::Sent.notification().is_some());
}
