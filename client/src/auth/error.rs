//! Auth error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here is fatal. Validation errors stay inside the form that raised
//! them, provider errors are shown to the user and the operation is
//! abandoned, and configuration errors disable enforcement or the operation
//! depending on the configured guard policy. No variant is retried.

use thiserror::Error;

/// Form-field problems, recovered locally by the page that raised them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter your name.")]
    MissingName,
    #[error("Enter your email address.")]
    MissingEmail,
    #[error("Enter your password.")]
    MissingPassword,
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The auth service rejected the operation.
    #[error("{message}")]
    Provider { status: u16, message: String },
    #[error("auth service is not configured: {0}")]
    Configuration(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("not available on server")]
    Unavailable,
}

impl AuthError {
    /// Message suitable for showing in the page.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Provider { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Provider { .. } => "The request was rejected. Please try again.".to_owned(),
            Self::Configuration(_) => "Sign-in is not available right now.".to_owned(),
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Serialization(_) | Self::Unavailable => "An unexpected error occurred.".to_owned(),
        }
    }
}
