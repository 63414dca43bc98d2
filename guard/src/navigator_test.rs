use super::*;
use crate::session::Identity;

fn navigator() -> Navigator {
    Navigator::new(SessionStore::new(), GuardConfig::default())
}

fn redirect(to: &str) -> Decision {
    Decision::Redirect(to.to_owned())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn unauthenticated_dashboard_redirects_to_login() {
    let nav = navigator();
    let result = nav.navigate("/dashboard");

    assert_eq!(result.decision, redirect("/login"));
    assert_eq!(result.location, "/login");
    assert!(!result.rendered(), "dashboard must not render");
}

#[test]
fn authenticated_login_redirects_to_dashboard() {
    let nav = navigator();
    nav.session().login(Identity::default());
    let result = nav.navigate("/login");

    assert_eq!(result.decision, redirect("/dashboard"));
    assert_eq!(result.location, "/dashboard");
    assert!(result.page.is_none());
}

#[test]
fn login_while_on_login_moves_to_dashboard() {
    let nav = navigator();
    assert!(nav.navigate("/login").rendered());

    nav.session().login(Identity::named("Dana"));
    assert_eq!(nav.location(), "/dashboard");

    let recheck = nav.recheck();
    assert_eq!(recheck.decision, Decision::Render);
    assert_eq!(recheck.page, Some(Page::Route(Route::Dashboard)));
}

#[test]
fn logout_while_on_dashboard_moves_to_login() {
    let nav = navigator();
    nav.session().login(Identity::default());
    assert!(nav.navigate("/dashboard").rendered());

    nav.session().logout();
    assert_eq!(nav.location(), "/login");

    let result = nav.navigate("/dashboard");
    assert_eq!(result.decision, redirect("/login"));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn unauthenticated_never_renders_protected_pages() {
    let nav = navigator();
    for route in Route::ALL.into_iter().filter(|r| r.access() == Access::Protected) {
        let result = nav.navigate(route.path());
        assert_eq!(result.decision, redirect("/login"), "{route:?}");
        assert!(!result.rendered(), "{route:?} rendered while unauthenticated");
    }
    let unknown = nav.navigate("/fleet/unknown");
    assert_eq!(unknown.decision, redirect("/login"));
}

#[test]
fn login_then_recheck_never_stays_on_login() {
    for start in ["/", "/login", "/cars", "/bookings"] {
        let nav = navigator();
        nav.navigate(start);
        nav.session().login(Identity::default());
        let result = nav.recheck();
        assert_ne!(result.location, "/login", "stuck on login after starting at {start}");
    }
}

#[test]
fn logout_then_protected_navigation_redirects() {
    let nav = navigator();
    nav.session().login(Identity::default());
    nav.navigate("/analytics");
    nav.session().logout();

    for route in Route::NAV {
        assert_eq!(nav.navigate(route.path()).decision, redirect("/login"));
    }
}

#[test]
fn repeated_navigation_redirects_once() {
    let nav = navigator();
    let first = nav.navigate("/cars");
    let second = nav.navigate("/cars");

    assert_eq!(first.decision, second.decision);
    assert_eq!(first.location, second.location);
    assert_eq!(nav.redirect_count(), 1);
}

#[test]
fn recheck_on_settled_location_is_noop() {
    let nav = navigator();
    nav.navigate("/dashboard");
    let before = nav.redirect_count();

    for _ in 0..3 {
        assert_eq!(nav.recheck().decision, Decision::Render);
    }
    assert_eq!(nav.redirect_count(), before);
}

// =============================================================================
// Routing details
// =============================================================================

#[test]
fn authenticated_protected_page_renders() {
    let nav = navigator();
    nav.session().login(Identity::default());
    let result = nav.navigate("/maintenance/");

    assert_eq!(result.requested, "/maintenance");
    assert_eq!(result.page, Some(Page::Route(Route::Maintenance)));
    assert_eq!(nav.location(), "/maintenance");
}

#[test]
fn authenticated_root_forwards_to_landing() {
    let nav = navigator();
    nav.session().login(Identity::default());
    let result = nav.navigate("/");

    assert_eq!(result.decision, redirect("/dashboard"));
    assert_eq!(result.location, "/dashboard");
}

#[test]
fn authenticated_unknown_path_is_not_found() {
    let nav = navigator();
    nav.session().login(Identity::default());
    let result = nav.navigate("/fleet/unknown");

    assert_eq!(result.decision, Decision::Render);
    assert_eq!(result.page, Some(Page::NotFound));
}

#[test]
fn share_pages_bypass_guard() {
    let nav = navigator();
    let result = nav.navigate("/customer-view?jobId=1&mobile=2");

    assert_eq!(result.decision, Decision::Render);
    assert_eq!(result.page, Some(Page::Route(Route::CustomerView)));

    nav.session().login(Identity::default());
    assert!(nav.navigate("/client-view").rendered());
}

#[test]
fn custom_login_path_replaces_table_login() {
    let config = GuardConfig::new("/signin", "/cars").unwrap();
    let nav = Navigator::new(SessionStore::new(), config);

    let signin = nav.navigate("/signin");
    assert_eq!(signin.page, Some(Page::Route(Route::Login)));

    nav.session().login(Identity::default());
    assert_eq!(nav.location(), "/cars");
    assert_eq!(nav.navigate("/login").page, Some(Page::NotFound));
}

// =============================================================================
// Subscription lifecycle
// =============================================================================

#[test]
fn drop_unsubscribes() {
    let session = SessionStore::new();
    let nav = Navigator::new(session.clone(), GuardConfig::default());
    assert_eq!(session.listener_count(), 1);

    drop(nav);
    assert_eq!(session.listener_count(), 0);
    session.login(Identity::default());
    assert!(session.is_authenticated());
}

#[test]
fn two_navigators_share_one_session() {
    let session = SessionStore::new();
    let a = Navigator::new(session.clone(), GuardConfig::default());
    let b = Navigator::new(session.clone(), GuardConfig::default());
    a.navigate("/login");
    b.navigate("/login");

    session.login(Identity::default());
    assert_eq!(a.location(), "/dashboard");
    assert_eq!(b.location(), "/dashboard");
}

#[test]
fn nested_logout_during_login_leaves_navigator_on_login() {
    let session = SessionStore::new();
    let weak = session.downgrade();
    session.subscribe(move |snapshot| {
        if snapshot.authenticated {
            if let Some(store) = weak.upgrade() {
                store.logout();
            }
        }
    });
    let nav = Navigator::new(session.clone(), GuardConfig::default());
    nav.navigate("/login");

    session.login(Identity::default());
    assert!(!session.is_authenticated());
    assert_eq!(nav.location(), "/login");
    assert_eq!(nav.redirect_count(), 0);
}

#[test]
fn nested_login_during_logout_keeps_protected_page() {
    let session = SessionStore::new();
    session.login(Identity::default());
    let weak = session.downgrade();
    session.subscribe(move |snapshot| {
        if !snapshot.authenticated {
            if let Some(store) = weak.upgrade() {
                store.login(Identity::named("Dana"));
            }
        }
    });
    let nav = Navigator::new(session.clone(), GuardConfig::default());
    assert!(nav.navigate("/cars").rendered());

    session.logout();
    assert!(session.is_authenticated());
    assert_eq!(nav.location(), "/cars");
}

#[test]
fn navigation_serializes_page() {
    let nav = navigator();
    let json = serde_json::to_value(nav.navigate("/login")).unwrap();
    assert_eq!(json["location"], "/login");
    assert_eq!(json["page"], serde_json::json!({ "page": "route", "route": "login" }));
}
