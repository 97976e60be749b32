use super::*;
use crate::auth::testing::{FakeOracle, confirmed_session, unconfirmed_session, user};

#[test]
fn validate_registration_reports_first_failing_field() {
    assert_eq!(validate_registration(" ", "a@b.com", "password1", "password1"), Err(ValidationError::MissingName));
    assert_eq!(validate_registration("Hanako", "", "password1", "password1"), Err(ValidationError::MissingEmail));
    assert_eq!(validate_registration("Hanako", "a@b.com", "", ""), Err(ValidationError::MissingPassword));
    assert_eq!(
        validate_registration("Hanako", "a@b.com", "short", "short"),
        Err(ValidationError::PasswordTooShort { min: 8 })
    );
    assert_eq!(
        validate_registration("Hanako", "a@b.com", "password1", "password2"),
        Err(ValidationError::PasswordMismatch)
    );
}

#[test]
fn password_length_counts_characters_not_bytes() {
    assert!(validate_registration("Hanako", "a@b.com", "いぬのさんぽ日和", "いぬのさんぽ日和").is_ok());
}

#[test]
fn too_short_message_names_the_minimum() {
    assert_eq!(
        ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN }.to_string(),
        "Password must be at least 8 characters."
    );
}

#[test]
fn validate_registration_trims_name_and_email() {
    let registration = validate_registration(" Hanako ", " a@b.com ", "password1", "password1").unwrap();
    assert_eq!(registration.email, "a@b.com");
    assert_eq!(registration.profile, Profile { name: "Hanako".to_owned() });
}

#[test]
fn registration_target_only_skips_verification_for_confirmed_sessions() {
    assert_eq!(registration_target(&SignUp::Session(confirmed_session("a@b.com")), "a@b.com").href(), "/dashboard");
    assert_eq!(
        registration_target(&SignUp::Session(unconfirmed_session("a@b.com")), "a@b.com").href(),
        "/verify-email?email=a%40b.com"
    );
    assert_eq!(
        registration_target(&SignUp::PendingConfirmation(user("a@b.com", None)), "a@b.com").href(),
        "/verify-email?email=a%40b.com"
    );
}

#[tokio::test]
async fn submit_registration_sends_profile_name() {
    let oracle = FakeOracle::new().with_sign_up(Ok(SignUp::PendingConfirmation(user("a@b.com", None))));
    let target = submit_registration(&oracle, "Hanako", "a@b.com", "password1", "password1").await.unwrap();
    assert_eq!(target.path(), "/verify-email");
    assert_eq!(oracle.sign_up_requests(), vec![("a@b.com".to_owned(), Profile { name: "Hanako".to_owned() })]);
}

#[tokio::test]
async fn submit_registration_does_not_call_oracle_when_passwords_differ() {
    let oracle = FakeOracle::new();
    let err = submit_registration(&oracle, "Hanako", "a@b.com", "password1", "password2").await.unwrap_err();
    assert_eq!(err.user_message(), "Passwords do not match.");
    assert!(oracle.sign_up_requests().is_empty());
}
