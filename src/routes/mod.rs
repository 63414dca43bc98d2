//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every dashboard page is served by the fallback page handler, which runs
//! the request path through the caller's navigator. `/login` and `/logout`
//! accept the form posts that flip the session. The two share-link pages and
//! `/healthz` are plain routes that never look at a client context.

pub mod auth;
pub mod pages;
pub mod share;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/login", get(pages::page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/customer-view", get(share::customer_view))
        .route("/client-view", get(share::client_view))
        .route("/healthz", get(healthz))
        .fallback(pages::page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
