//! Client context lifecycle: cookie lookup, creation, idle eviction.
//!
//! DESIGN
//! ======
//! A browser is identified by the `fleet_context` cookie, an opaque UUID. An
//! unknown or missing id gets a fresh context (unauthenticated, at `/`) and
//! a new cookie. The cookie carries no max-age, so closing the browser ends
//! the context from the client side; the eviction task ends it server side
//! once it has been idle for the configured timeout.

use std::sync::Arc;
use std::time::Instant;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use crate::state::{AppState, ClientContext};

pub const CONTEXT_COOKIE: &str = "fleet_context";

/// Context id carried by the request cookie, if it parses.
#[must_use]
pub fn context_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(CONTEXT_COOKIE).and_then(|c| Uuid::parse_str(c.value()).ok())
}

fn context_cookie(id: Uuid, secure: bool) -> Cookie<'static> {
    Cookie::build((CONTEXT_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Find the caller's context, creating one when the cookie is missing or
/// stale. The returned jar carries the cookie to set, if any.
pub async fn resolve(state: &AppState, jar: CookieJar) -> (CookieJar, Arc<ClientContext>) {
    if let Some(id) = context_id(&jar) {
        let existing = state.contexts.read().await.get(&id).cloned();
        if let Some(ctx) = existing {
            ctx.touch();
            return (jar, ctx);
        }
        debug!(context_id = %id, "unknown context cookie; starting fresh");
    }

    let id = Uuid::new_v4();
    let ctx = Arc::new(ClientContext::new(id, &state.config));
    state.contexts.write().await.insert(id, Arc::clone(&ctx));
    info!(context_id = %id, "client context created");

    (jar.add(context_cookie(id, state.config.cookie_secure)), ctx)
}

/// Drop contexts idle for longer than the configured timeout. Returns how
/// many were removed.
pub async fn evict_idle_at(state: &AppState, now: Instant) -> usize {
    let timeout = state.config.context_idle_timeout;
    let mut contexts = state.contexts.write().await;
    let before = contexts.len();
    contexts.retain(|_, ctx| now.saturating_duration_since(ctx.last_seen()) <= timeout);
    before - contexts.len()
}

/// Spawn the background eviction task. Returns a handle for shutdown.
pub fn spawn_eviction_task(state: AppState) -> JoinHandle<()> {
    let every = state.config.context_sweep_interval;
    info!(
        sweep_interval_secs = every.as_secs(),
        idle_timeout_secs = state.config.context_idle_timeout.as_secs(),
        "context eviction configured"
    );
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let evicted = evict_idle_at(&state, Instant::now()).await;
            if evicted > 0 {
                info!(evicted, "evicted idle client contexts");
            }
        }
    })
}

#[cfg(test)]
#[path = "contexts_test.rs"]
mod tests;
