//! The route guard decision.
//!
//! `evaluate` is pure: it takes the session flag and a path and returns what
//! the navigation layer should do. It never fails and has no side effects.
//!
//! | authenticated | path        | decision           |
//! |---------------|-------------|--------------------|
//! | no            | login       | render             |
//! | no            | anything    | redirect to login  |
//! | yes           | login       | redirect to landing|
//! | yes           | anything    | render             |

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use serde::Serialize;

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("{which} path must start with '/': {path:?}")]
    RelativePath { which: &'static str, path: String },
    #[error("landing path must differ from login path ({0})")]
    LandingIsLogin(String),
    #[error("landing path cannot be the root path")]
    LandingIsRoot,
}

/// Where unauthenticated and authenticated contexts are sent.
///
/// Construction guarantees the two paths differ, so a redirect target always
/// renders under the state that produced the redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    login_path: String,
    landing_path: String,
}

impl GuardConfig {
    /// Build a config from absolute paths.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] if either path is relative or both are equal
    /// after normalization.
    pub fn new(login_path: &str, landing_path: &str) -> Result<Self, GuardError> {
        for (which, path) in [("login", login_path), ("landing", landing_path)] {
            if !path.starts_with('/') {
                return Err(GuardError::RelativePath { which, path: path.to_owned() });
            }
        }
        let login_path = crate::route::normalize_path(login_path);
        let landing_path = crate::route::normalize_path(landing_path);
        if login_path == landing_path {
            return Err(GuardError::LandingIsLogin(login_path));
        }
        // `/` is an alias that forwards to the landing page.
        if landing_path == "/" {
            return Err(GuardError::LandingIsRoot);
        }
        Ok(Self { login_path, landing_path })
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            landing_path: DEFAULT_LANDING_PATH.to_owned(),
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum Decision {
    Render,
    Redirect(String),
}

impl Decision {
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Render => None,
            Self::Redirect(to) => Some(to),
        }
    }
}

/// Decide whether `path` renders for a context with the given flag.
///
/// `path` is expected to be normalized (see [`crate::route::normalize_path`]).
#[must_use]
pub fn evaluate(authenticated: bool, path: &str, config: &GuardConfig) -> Decision {
    let on_login = path == config.login_path;
    match (authenticated, on_login) {
        (false, false) => Decision::Redirect(config.login_path.clone()),
        (true, true) => Decision::Redirect(config.landing_path.clone()),
        _ => Decision::Render,
    }
}
