//! Session state and route gating for the fleet dashboard.
//!
//! This crate is UI-framework agnostic. The server crate drives it with one
//! [`Navigator`] per client context, but the guard itself is a pure function
//! and can be exercised without any rendering layer.
//!
//! ARCHITECTURE
//! ============
//! - [`session`] owns the authentication flag and notifies listeners on change.
//! - [`guard`] decides `Render` vs `Redirect` for a path and a session flag.
//! - [`route`] maps normalized paths onto the dashboard's logical pages.
//! - [`navigator`] ties the three together and re-checks on every session change.
//! - [`share`] covers the two public share-link pages that skip the guard.

pub mod guard;
pub mod navigator;
pub mod route;
pub mod session;
pub mod share;

pub use guard::{Decision, GuardConfig, GuardError, evaluate};
pub use navigator::{Navigation, Navigator, Page};
pub use route::{Access, Route, normalize_path};
pub use session::{Identity, Session, SessionStore, Subscription, WeakSessionStore};
pub use share::{ShareAccess, ShareError};
