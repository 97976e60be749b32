//! Networking modules for the external auth service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gotrue` implements the session oracle over the service's REST API and
//! `types` defines its wire schema.

pub mod gotrue;
pub mod types;
