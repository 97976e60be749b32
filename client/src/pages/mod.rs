//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page keeps its decisions in plain functions (validation, targets,
//! render state) that tests drive against an in-memory oracle; the
//! components only bind those functions to signals and the router.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod logout;
pub mod register;
pub mod verify_email;
