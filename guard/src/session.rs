//! Session state holder for one client context.
//!
//! DESIGN
//! ======
//! `SessionStore` is a cheap cloneable handle over a mutex-guarded cell.
//! Mutations are applied under the lock; listeners are then invoked with a
//! snapshot after the lock is released, so a listener may read the store
//! (or even mutate it) without deadlocking.
//!
//! Listeners only fire when the snapshot actually changes. Re-evaluation
//! downstream is idempotent, so skipping no-op notifications loses nothing.
//!
//! A listener that mutates the store nests a second round of notifications
//! inside the first, so later listeners in the outer round see a snapshot
//! that is already stale. Listeners that act on the flag should read it back
//! through a [`WeakSessionStore`] instead of trusting the snapshot.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

/// Identity fields supplied at login. Never verified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    /// Identity carrying only a display name.
    #[must_use]
    pub fn named(display_name: impl Into<String>) -> Self {
        Self { user_id: None, display_name: Some(display_name.into()) }
    }
}

/// Authentication flag plus the identity that came with it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub display_name: Option<String>,
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    session: Session,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Shared session cell with synchronous change notification.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    /// New store in the unauthenticated state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: Session::default(),
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Non-owning handle, for listeners that need to read the live state
    /// without keeping the store alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakSessionStore {
        WeakSessionStore { inner: Arc::downgrade(&self.inner) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Listeners never run under this lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark the session authenticated. Any identity is accepted.
    pub fn login(&self, identity: Identity) {
        self.replace(Session {
            authenticated: true,
            user_id: identity.user_id,
            display_name: identity.display_name,
        });
    }

    /// Mark the session unauthenticated and drop the identity.
    pub fn logout(&self) {
        self.replace(Session::default());
    }

    /// Current authentication flag.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.authenticated
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    /// Register a listener. It runs after every effective change, in
    /// registration order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription(id)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != subscription.0);
        inner.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn replace(&self, next: Session) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if inner.session == next {
                return;
            }
            inner.session = next;
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
            (inner.session.clone(), listeners)
        };

        tracing::debug!(
            authenticated = snapshot.authenticated,
            listeners = listeners.len(),
            "session changed"
        );
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Weak counterpart of [`SessionStore`].
#[derive(Clone)]
pub struct WeakSessionStore {
    inner: Weak<Mutex<Inner>>,
}

impl WeakSessionStore {
    /// The store, if any strong handle is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<SessionStore> {
        self.inner.upgrade().map(|inner| SessionStore { inner })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("session", &inner.session)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}
