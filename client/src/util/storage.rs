//! JSON values in `localStorage`, used to keep the auth session across
//! reloads.
//!
//! Storage is best-effort: a missing window, disabled storage, a quota
//! error, or an entry that no longer decodes all read as "nothing stored".
//! Without `hydrate` every call is a no-op.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored value for `key`, or `None` when absent or undecodable.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()
            .and_then(|storage| storage.get_item(key).ok().flatten())
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        if let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(value)) {
            if storage.set_item(key, &raw).is_err() {
                log::warn!("could not persist {key}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
