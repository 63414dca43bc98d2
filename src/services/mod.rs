//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own context lifecycle and the login seam so route handlers
//! can stay focused on request/response translation.

pub mod contexts;
pub mod credentials;
