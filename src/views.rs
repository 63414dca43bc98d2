//! Server-rendered HTML shells.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page content (charts, tables, fleet records) belongs to presentation
//! collaborators that mount into the `#page-content` element. These views
//! only render once the guard has let a page through, and they never read
//! anything but the session snapshot and the route.
//!
//! Views are Leptos components rendered to a string with `RenderHtml`.
//! Interpolated text and attribute values are escaped by the renderer.

use guard::{Route, Session, ShareAccess, ShareError};
use leptos::prelude::*;

/// Render a view tree to an HTML document string under a fresh owner.
fn render<V, F>(build: F) -> String
where
    V: IntoView + 'static,
    F: FnOnce() -> V,
{
    Owner::new().with(|| build().to_html())
}

#[component]
fn Shell(title: String, children: Children) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{format!("{title} · Fleet Admin")}</title>
            </head>
            <body>{children()}</body>
        </html>
    }
}

#[component]
fn NavBar(active: Option<Route>, display_name: String) -> impl IntoView {
    let links = Route::NAV
        .into_iter()
        .map(|route| {
            let class = (Some(route) == active).then_some("active");
            view! {
                <li>
                    <a href=route.path() class=class>{route.title()}</a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <ul>{links}</ul>
            <form method="post" action="/logout" class="user">
                <span>{display_name}</span>
                <button type="submit">"Log out"</button>
            </form>
        </nav>
    }
}

fn display_name(session: &Session) -> String {
    session.display_name.clone().unwrap_or_else(|| "Operator".to_owned())
}

/// A protected dashboard page the guard has let through.
#[must_use]
pub fn page(route: Route, session: &Session) -> String {
    let name = display_name(session);
    render(move || {
        view! {
            <Shell title=route.title().to_owned()>
                <NavBar active=Some(route) display_name=name/>
                <main>
                    <h1>{route.title()}</h1>
                    <section id="page-content" data-route=route.path()></section>
                </main>
            </Shell>
        }
    })
}

#[must_use]
pub fn login() -> String {
    render(|| {
        view! {
            <Shell title=Route::Login.title().to_owned()>
                <main class="login">
                    <h1>"Fleet Admin"</h1>
                    <form method="post" action="/login">
                        <label>
                            "Username"
                            <input name="username" autocomplete="username"/>
                        </label>
                        <label>
                            "Password"
                            <input name="password" type="password" autocomplete="current-password"/>
                        </label>
                        <button type="submit">"Sign in"</button>
                    </form>
                </main>
            </Shell>
        }
    })
}

#[must_use]
pub fn not_found(path: &str, session: &Session) -> String {
    let name = display_name(session);
    let path = path.to_owned();
    render(move || {
        view! {
            <Shell title="Not found".to_owned()>
                <NavBar active=None display_name=name/>
                <main>
                    <h1>"Page not found"</h1>
                    <p>"No page at " <code>{path}</code> "."</p>
                </main>
            </Shell>
        }
    })
}

/// Share-link page opened with the expected parameters.
#[must_use]
pub fn share(route: Route, access: &ShareAccess) -> String {
    let access = access.clone();
    render(move || {
        let detail = match access {
            ShareAccess::Customer { job_id, mobile } => view! {
                <dl>
                    <dt>"Job"</dt>
                    <dd>{job_id}</dd>
                    <dt>"Mobile"</dt>
                    <dd>{mobile}</dd>
                </dl>
            }
            .into_any(),
            ShareAccess::Client { job_id } => view! {
                <dl>
                    <dt>"Job"</dt>
                    <dd>{job_id}</dd>
                </dl>
            }
            .into_any(),
        };
        view! {
            <Shell title=route.title().to_owned()>
                <main class="share">
                    <h1>{route.title()}</h1>
                    {detail}
                    <section id="page-content" data-route=route.path()></section>
                </main>
            </Shell>
        }
    })
}

/// Static page shown when a share link lacks its identifier.
#[must_use]
pub fn invalid_access(error: &ShareError) -> String {
    let hint = error.to_string();
    render(move || {
        view! {
            <Shell title="Invalid access".to_owned()>
                <main class="share">
                    <h1>"Invalid access"</h1>
                    <p>"This link is incomplete or invalid."</p>
                    <p class="hint">{hint}</p>
                </main>
            </Shell>
        }
    })
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
