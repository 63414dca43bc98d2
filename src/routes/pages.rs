//! Dashboard page handler: every GET is a navigation event.

use std::collections::HashMap;

use axum::extract::{OriginalUri, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use guard::{Access, Page, Route};

use crate::routes::share;
use crate::services::contexts;
use crate::state::AppState;
use crate::views;

/// `GET <any page>`: run the path through the caller's navigator.
///
/// A redirect decision becomes `303 See Other` to the navigator's location;
/// the requested page is not rendered.
pub async fn page(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let (jar, ctx) = contexts::resolve(&state, jar).await;
    let nav = ctx.navigator.navigate(uri.path());
    tracing::debug!(
        context_id = %ctx.id,
        requested = %nav.requested,
        location = %nav.location,
        rendered = nav.rendered(),
        "page request"
    );

    let response = match nav.page {
        None => Redirect::to(&nav.location).into_response(),
        Some(Page::Route(Route::Login)) => Html(views::login()).into_response(),
        Some(Page::Route(route)) if route.access() == Access::Public => {
            let params = Query::<HashMap<String, String>>::try_from_uri(&uri)
                .map(|Query(params)| params)
                .unwrap_or_default();
            share::render(route, &params)
        }
        Some(Page::Route(route)) => {
            Html(views::page(route, &ctx.session().snapshot())).into_response()
        }
        Some(Page::NotFound) => {
            let html = views::not_found(&nav.requested, &ctx.session().snapshot());
            (StatusCode::NOT_FOUND, Html(html)).into_response()
        }
    };

    (jar, response).into_response()
}
