//! Share-link pages for customers and clients. No context, no guard.

use std::collections::HashMap;

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Response};
use guard::Route;

use crate::views;

/// Render a share page, or the static invalid-access page when its
/// identifier is missing. Both are `200 OK`.
pub(crate) fn render(route: Route, params: &HashMap<String, String>) -> Response {
    match guard::share::check(route, params) {
        Ok(access) => Html(views::share(route, &access)).into_response(),
        Err(e) => {
            tracing::info!(route = ?route, error = %e, "share link rejected");
            Html(views::invalid_access(&e)).into_response()
        }
    }
}

/// `GET /customer-view?jobId=..&mobile=..`
pub async fn customer_view(Query(params): Query<HashMap<String, String>>) -> Response {
    render(Route::CustomerView, &params)
}

/// `GET /client-view?jobID=..`
pub async fn client_view(Query(params): Query<HashMap<String, String>>) -> Response {
    render(Route::ClientView, &params)
}
