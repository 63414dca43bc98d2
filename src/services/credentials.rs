//! Login credential seam.
//!
//! The dashboard has no credential store. `AcceptAny` turns whatever was
//! typed into a display name and lets the session log in; it is demo-grade
//! and must not be read as authentication. A real check plugs in behind
//! `CredentialCheck` without touching the guard or the session holder.

use guard::Identity;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("credentials rejected")]
    Rejected,
}

/// Turns submitted login input into an identity, or refuses it.
pub trait CredentialCheck: Send + Sync {
    /// # Errors
    ///
    /// Returns [`CredentialError::Rejected`] when the input is refused.
    fn check(&self, username: &str) -> Result<Identity, CredentialError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Accepts every input. Blank input logs in without a display name.
pub struct AcceptAny;

impl CredentialCheck for AcceptAny {
    fn check(&self, username: &str) -> Result<Identity, CredentialError> {
        let username = username.trim();
        let display_name = (!username.is_empty()).then(|| username.to_owned());
        Ok(Identity { user_id: None, display_name })
    }

    fn name(&self) -> &'static str {
        "accept-any"
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
