//! # dogwalk-client
//!
//! Leptos frontend for the dog-walk companion app.
//!
//! The `auth` module is plain Rust: route guard, event listener, redirect
//! latch, resend gate, and the `SessionOracle` seam. `net::gotrue` implements
//! that seam against a GoTrue-compatible REST service. Pages, components and
//! `util::auth` bind the core to Leptos signals and the router.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    config::AuthConfig::from_build_env().report_once();
    leptos::mount::hydrate_body(app::App);
}
