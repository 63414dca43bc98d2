//! Auth routes: demo login form and logout.

use axum::extract::{Form, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::services::contexts;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
}

/// `POST /login`: log the caller's session in and send them where the
/// guard says a logged-in context on the login page belongs.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let (jar, ctx) = contexts::resolve(&state, jar).await;
    let login_path = state.config.guard.login_path();

    let identity = match state.credentials.check(&form.username) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(
                context_id = %ctx.id,
                checker = state.credentials.name(),
                error = %e,
                "login refused"
            );
            return (jar, Redirect::to(login_path)).into_response();
        }
    };

    ctx.session().login(identity);
    let nav = ctx.navigator.navigate(login_path);
    tracing::info!(context_id = %ctx.id, location = %nav.location, "logged in");

    (jar, Redirect::to(&nav.location)).into_response()
}

/// `POST /logout`: clear the session and return to the login page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, ctx) = contexts::resolve(&state, jar).await;

    ctx.session().logout();
    let nav = ctx.navigator.navigate(state.config.guard.login_path());
    tracing::info!(context_id = %ctx.id, location = %nav.location, "logged out");

    (jar, Redirect::to(&nav.location)).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
