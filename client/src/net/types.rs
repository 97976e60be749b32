//! Wire DTOs for the GoTrue auth REST API.
//!
//! DESIGN
//! ======
//! Response types decode only the fields the app reads; everything else the
//! service sends is ignored. Conversion into the UI-facing `Session`/`User`
//! happens here so the rest of the crate never sees wire shapes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::oracle::Profile;
use crate::auth::session::{Session, User};

/// Lifetime assumed when the service omits both `expires_at` and `expires_in`.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WireUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl From<WireUser> for User {
    fn from(wire: WireUser) -> Self {
        let name = wire.user_metadata.get("name").and_then(serde_json::Value::as_str).map(str::to_owned);
        Self {
            id: wire.id,
            email: wire.email.unwrap_or_default(),
            email_confirmed_at: wire.email_confirmed_at,
            created_at: wire.created_at,
            name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WireSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: WireUser,
}

impl WireSession {
    #[must_use]
    pub fn into_session(self, now_secs: i64) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now_secs.saturating_add(self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// `POST /signup` answers with a session when the project auto-confirms
/// addresses and with the bare user otherwise.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(WireSession),
    User(WireUser),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: &'a Profile,
}

#[derive(Debug, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ResendRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub email: &'a str,
}

// =============================================================================
// DECODING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map an error response to [`AuthError::Provider`], preferring the most
/// descriptive message field the service filled in.
#[must_use]
pub fn provider_error(status: u16, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = [parsed.error_description, parsed.msg, parsed.message, parsed.error]
        .into_iter()
        .flatten()
        .find(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    AuthError::Provider { status, message }
}

/// Decode a JSON body, or the provider error for non-2xx statuses.
///
/// # Errors
///
/// Returns [`AuthError::Provider`] for non-2xx statuses and
/// [`AuthError::Serialization`] when a 2xx body does not match `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, AuthError> {
    if !is_success(status) {
        return Err(provider_error(status, body));
    }
    serde_json::from_str(body).map_err(|e| AuthError::Serialization(e.to_string()))
}

/// Accept any 2xx status, ignoring the body.
///
/// # Errors
///
/// Returns [`AuthError::Provider`] for non-2xx statuses.
pub fn expect_success(status: u16, body: &str) -> Result<(), AuthError> {
    if is_success(status) { Ok(()) } else { Err(provider_error(status, body)) }
}

/// Serialize a request body.
///
/// # Errors
///
/// Returns [`AuthError::Serialization`] if `body` cannot be encoded.
pub fn encode_body<T: Serialize>(body: &T) -> Result<String, AuthError> {
    serde_json::to_string(body).map_err(|e| AuthError::Serialization(e.to_string()))
}
