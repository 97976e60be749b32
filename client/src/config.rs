//! Auth-service configuration and its shape validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle reads the service URL and key at build time; the SSR
//! server reads the same variables at runtime for its startup report. Values
//! are validated for shape only. A malformed configuration is logged and
//! then either bypasses the route guard (`fail-open`, the default, so local
//! setups are not locked out) or keeps enforcing it (`fail-closed`).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::auth::guard::GuardMode;

pub const URL_VAR: &str = "DOGWALK_AUTH_URL";
pub const KEY_VAR: &str = "DOGWALK_AUTH_KEY";
pub const POLICY_VAR: &str = "DOGWALK_GUARD_POLICY";

const PLACEHOLDER_URL: &str = "https://placeholder.supabase.co";
const PLACEHOLDER_KEY: &str = "placeholder-key";
const MIN_KEY_LEN: usize = 20;
const REDACTED_KEY_PREFIX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DOGWALK_AUTH_URL is not set")]
    MissingUrl,
    #[error("DOGWALK_AUTH_KEY is not set")]
    MissingKey,
    #[error("DOGWALK_AUTH_URL must start with https://")]
    InsecureUrl,
    #[error("DOGWALK_AUTH_URL/DOGWALK_AUTH_KEY still hold placeholder values")]
    Placeholder,
    #[error("DOGWALK_AUTH_KEY is too short")]
    KeyTooShort,
    #[error("unknown DOGWALK_GUARD_POLICY '{0}' (expected 'fail-open' or 'fail-closed')")]
    UnknownPolicy(String),
}

/// What the route guard does when the configuration is invalid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPolicy {
    #[default]
    FailOpen,
    FailClosed,
}

impl FromStr for GuardPolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            other => Err(ConfigError::UnknownPolicy(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthConfig {
    pub url: String,
    pub key: String,
    pub policy: GuardPolicy,
}

impl AuthConfig {
    /// Build from raw variable values. Blank values count as unset; an
    /// unknown policy is logged and falls back to the default.
    #[must_use]
    pub fn from_vars(url: Option<&str>, key: Option<&str>, policy: Option<&str>) -> Self {
        let policy = match policy.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => GuardPolicy::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err: ConfigError| {
                log::warn!("{err}; using fail-open");
                GuardPolicy::default()
            }),
        };
        Self {
            url: url.map(str::trim).unwrap_or_default().trim_end_matches('/').to_owned(),
            key: key.map(str::trim).unwrap_or_default().to_owned(),
            policy,
        }
    }

    /// Values baked into the bundle at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("DOGWALK_AUTH_URL"),
            option_env!("DOGWALK_AUTH_KEY"),
            option_env!("DOGWALK_GUARD_POLICY"),
        )
    }

    /// Values from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var(URL_VAR).ok();
        let key = std::env::var(KEY_VAR).ok();
        let policy = std::env::var(POLICY_VAR).ok();
        Self::from_vars(url.as_deref(), key.as_deref(), policy.as_deref())
    }

    /// Shape checks only: nothing here contacts the service.
    ///
    /// # Errors
    ///
    /// Returns the first rule the URL or key violates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }
        if self.key.is_empty() {
            return Err(ConfigError::MissingKey);
        }
        if self.url == PLACEHOLDER_URL || self.key == PLACEHOLDER_KEY {
            return Err(ConfigError::Placeholder);
        }
        if !self.url.starts_with("https://") {
            return Err(ConfigError::InsecureUrl);
        }
        if self.key.chars().count() <= MIN_KEY_LEN {
            return Err(ConfigError::KeyTooShort);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[must_use]
    pub fn guard_mode(&self) -> GuardMode {
        match (self.is_valid(), self.policy) {
            (true, _) | (false, GuardPolicy::FailClosed) => GuardMode::Enforce,
            (false, GuardPolicy::FailOpen) => GuardMode::Bypass,
        }
    }

    /// `path` joined onto the service URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }

    /// Key prefix safe to print in diagnostics.
    #[must_use]
    pub fn redacted_key(&self) -> String {
        if self.key.is_empty() {
            return "(unset)".to_owned();
        }
        let prefix: String = self.key.chars().take(REDACTED_KEY_PREFIX).collect();
        format!("{prefix}...")
    }

    /// Log the configuration problem, if any. Returns whether it is valid.
    pub fn report(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                let url = if self.url.is_empty() { "(unset)" } else { self.url.as_str() };
                log::error!(
                    "auth service misconfigured: {err} ({URL_VAR}={url}, {KEY_VAR}={}); guard mode {:?}",
                    self.redacted_key(),
                    self.guard_mode(),
                );
                false
            }
        }
    }

    /// [`Self::report`] for the first caller in this process. Later calls
    /// log nothing and return `None`.
    pub fn report_once(&self) -> Option<bool> {
        static REPORTED: AtomicBool = AtomicBool::new(false);
        if REPORTED.swap(true, Ordering::Relaxed) {
            return None;
        }
        Some(self.report())
    }
}
