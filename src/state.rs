//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the server config, the credential check and a map of live client
//! contexts. Each context is one browser: its own session and navigator,
//! kept in memory only and dropped on idle eviction or restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use guard::{Navigator, SessionStore};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::services::credentials::CredentialCheck;

// =============================================================================
// CLIENT CONTEXT
// =============================================================================

/// Per-browser state: one session and the navigator subscribed to it.
pub struct ClientContext {
    pub id: Uuid,
    pub navigator: Navigator,
    last_seen: Mutex<Instant>,
}

impl ClientContext {
    #[must_use]
    pub fn new(id: Uuid, config: &Config) -> Self {
        Self::new_at(id, config, Instant::now())
    }

    #[must_use]
    pub fn new_at(id: Uuid, config: &Config, now: Instant) -> Self {
        Self {
            id,
            navigator: Navigator::new(SessionStore::new(), config.guard.clone()),
            last_seen: Mutex::new(now),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.navigator.session()
    }

    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    pub fn touch_at(&self, now: Instant) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    #[must_use]
    pub fn last_seen(&self) -> Instant {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<dyn CredentialCheck>,
    pub contexts: Arc<RwLock<HashMap<Uuid, Arc<ClientContext>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, credentials: Arc<dyn CredentialCheck>) -> Self {
        Self {
            config: Arc::new(config),
            credentials,
            contexts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
