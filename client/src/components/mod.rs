//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Small presentational pieces shared by the auth pages and the dashboard.

pub mod error_banner;
pub mod feature_card;
pub mod loading_screen;
