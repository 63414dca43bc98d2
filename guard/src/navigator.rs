//! Per-context navigation with the guard applied on every transition.
//!
//! DESIGN
//! ======
//! A `Navigator` owns the current location of one client context and holds a
//! handle to that context's `SessionStore`. It subscribes to the store on
//! construction: every session change re-evaluates the current location, so
//! logging in on `/login` lands on the landing page and logging out anywhere
//! protected lands on `/login` without waiting for the next request.
//!
//! Lock order is navigator state, then session. The session listener reads
//! the live flag through a weak session handle, taken after the navigator
//! state lock and only once the session has released its own lock.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::Serialize;

use crate::guard::{Decision, GuardConfig, evaluate};
use crate::route::{Access, Route, normalize_path};
use crate::session::{SessionStore, Subscription};

/// What a permitted navigation shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "route", rename_all = "snake_case")]
pub enum Page {
    Route(Route),
    NotFound,
}

/// Result of one navigation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Normalized path that was asked for.
    pub requested: String,
    /// Where the context ended up.
    pub location: String,
    pub decision: Decision,
    /// `None` when the requested page was suppressed by a redirect.
    pub page: Option<Page>,
}

impl Navigation {
    #[must_use]
    pub fn rendered(&self) -> bool {
        self.page.is_some()
    }
}

struct NavState {
    location: String,
    redirects: u64,
}

impl NavState {
    fn redirect_to(&mut self, target: &str) {
        // Already there: repeating the redirect is a no-op.
        if self.location == target {
            return;
        }
        tracing::debug!(from = %self.location, to = %target, "redirect");
        target.clone_into(&mut self.location);
        self.redirects += 1;
    }
}

pub struct Navigator {
    session: SessionStore,
    config: GuardConfig,
    state: Arc<Mutex<NavState>>,
    subscription: Subscription,
}

impl Navigator {
    /// Create a navigator at `/` and subscribe it to `session`.
    #[must_use]
    pub fn new(session: SessionStore, config: GuardConfig) -> Self {
        let state = Arc::new(Mutex::new(NavState { location: "/".to_owned(), redirects: 0 }));

        let weak: Weak<Mutex<NavState>> = Arc::downgrade(&state);
        let weak_session = session.downgrade();
        let listener_config = config.clone();
        let subscription = session.subscribe(move |snapshot| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            // A nested change may have superseded the snapshot; decide on the live flag.
            let authenticated = weak_session
                .upgrade()
                .map_or(snapshot.authenticated, |s| s.is_authenticated());
            let location = state.location.clone();
            let (decision, _) = resolve(authenticated, &location, &listener_config);
            if let Decision::Redirect(target) = decision {
                state.redirect_to(&target);
            }
        });

        Self { session, config, state, subscription }
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to `path`, applying the guard.
    ///
    /// Share-link pages bypass the guard. A redirect moves the location to
    /// the target and suppresses the requested page.
    pub fn navigate(&self, path: &str) -> Navigation {
        let requested = normalize_path(path);
        let mut state = self.lock();
        let authenticated = self.session.is_authenticated();

        let (decision, page) = resolve(authenticated, &requested, &self.config);
        match &decision {
            Decision::Render => requested.clone_into(&mut state.location),
            Decision::Redirect(target) => {
                // The requested page is never entered, so the redirect is
                // measured from where the context currently is.
                state.redirect_to(target);
            }
        }

        tracing::debug!(
            requested = %requested,
            location = %state.location,
            authenticated,
            rendered = page.is_some(),
            "navigation"
        );
        Navigation { requested, location: state.location.clone(), decision, page }
    }

    /// Re-run the guard on the current location, as a session listener does.
    pub fn recheck(&self) -> Navigation {
        let location = self.location();
        self.navigate(&location)
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.lock().location.clone()
    }

    /// Number of times the location has been moved by a redirect.
    #[must_use]
    pub fn redirect_count(&self) -> u64 {
        self.lock().redirects
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        self.session.unsubscribe(self.subscription);
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("location", &self.location())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decision plus page for a normalized path.
fn resolve(authenticated: bool, path: &str, config: &GuardConfig) -> (Decision, Option<Page>) {
    if let Some(route) = Route::from_path(path) {
        if route.access() == Access::Public {
            return (Decision::Render, Some(Page::Route(route)));
        }
    }

    match evaluate(authenticated, path, config) {
        Decision::Render => match page_for(path, config) {
            Page::Route(Route::Root) => {
                (Decision::Redirect(config.landing_path().to_owned()), None)
            }
            page => (Decision::Render, Some(page)),
        },
        redirect @ Decision::Redirect(_) => (redirect, None),
    }
}

fn page_for(path: &str, config: &GuardConfig) -> Page {
    if path == config.login_path() {
        return Page::Route(Route::Login);
    }
    match Route::from_path(path) {
        // The table's login route is only the login page when configured so.
        Some(Route::Login) | None => Page::NotFound,
        Some(route) => Page::Route(route),
    }
}
