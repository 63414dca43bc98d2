//! Logical route table for the dashboard.
//!
//! Only the login path and the share-link pages are reachable without a
//! session. Every other path, including ones not in the table, is protected.

#[cfg(test)]
#[path = "route_test.rs"]
mod tests;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Cars,
    Bookings,
    Maintenance,
    Customers,
    Analytics,
    Settings,
    CustomerView,
    ClientView,
}

/// How a route relates to the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only reachable while unauthenticated.
    Login,
    /// Requires an authenticated session.
    Protected,
    /// Skips the guard entirely.
    Public,
}

impl Route {
    pub const ALL: [Self; 11] = [
        Self::Root,
        Self::Login,
        Self::Dashboard,
        Self::Cars,
        Self::Bookings,
        Self::Maintenance,
        Self::Customers,
        Self::Analytics,
        Self::Settings,
        Self::CustomerView,
        Self::ClientView,
    ];

    /// Pages listed in the dashboard navigation bar.
    pub const NAV: [Self; 7] = [
        Self::Dashboard,
        Self::Cars,
        Self::Bookings,
        Self::Maintenance,
        Self::Customers,
        Self::Analytics,
        Self::Settings,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Cars => "/cars",
            Self::Bookings => "/bookings",
            Self::Maintenance => "/maintenance",
            Self::Customers => "/customers",
            Self::Analytics => "/analytics",
            Self::Settings => "/settings",
            Self::CustomerView => "/customer-view",
            Self::ClientView => "/client-view",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Root | Self::Dashboard => "Dashboard",
            Self::Login => "Sign in",
            Self::Cars => "Cars",
            Self::Bookings => "Bookings",
            Self::Maintenance => "Maintenance",
            Self::Customers => "Customers",
            Self::Analytics => "Analytics",
            Self::Settings => "Settings",
            Self::CustomerView => "Job status",
            Self::ClientView => "Client job",
        }
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Login => Access::Login,
            Self::CustomerView | Self::ClientView => Access::Public,
            _ => Access::Protected,
        }
    }

    /// Look up a normalized path. Unknown paths return `None`.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Canonical form of a request path.
///
/// Drops query and fragment, collapses repeated slashes and strips the
/// trailing slash. An empty result becomes `/`.
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let segments: Vec<&str> = raw[..end].split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_owned();
    }
    let mut out = String::with_capacity(end + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}
