//! Browser glue: clock, blocking notifications, and the auth URL fragment.
//!
//! Everything here is hydrate-only; on the server the helpers fall back to
//! the system clock, logging, or `None`.

/// Seconds since the Unix epoch.
#[must_use]
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Show a blocking notification.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::info!("{message}");
    }
}

/// Take the URL fragment if it carries auth tokens or an auth error, and
/// strip it from the address bar so it is consumed only once.
pub fn take_auth_fragment() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        let location = window.location();
        let hash = location.hash().ok()?;
        if !(hash.contains("access_token=") || hash.contains("error_description=")) {
            return None;
        }
        let clean = format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        );
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean));
        }
        Some(hash)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
