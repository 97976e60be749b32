//! Client-side auth core: session values, the route guard, the auth event
//! listener, and the seams to the external auth service.
//!
//! ARCHITECTURE
//! ============
//! Everything in this module is plain Rust with no Leptos dependency so the
//! decision logic can be exercised natively. `util::auth` wires it into the
//! router and reactive context.

pub mod error;
pub mod guard;
pub mod listener;
pub mod navigator;
pub mod oracle;
pub mod resend;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
