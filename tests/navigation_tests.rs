mod common;

use common::{ADMIN_TOKEN, FACULTY_TOKEN, STUDENT_TOKEN, portal, spawn_backend};
use fyp_portal_client::{
    Navigation, RenderedView, Role, Session, SessionStore, View, portal_routes,
    routes::{Access, RoutePattern},
};
use std::collections::BTreeMap;

fn logged_in(token: &str, role: Role) -> SessionStore {
    let session = SessionStore::in_memory();
    session.init(&Session::new(token, role)).unwrap();
    session
}

fn rendered(view: View) -> Navigation {
    Navigation::Render(RenderedView {
        view,
        params: BTreeMap::new(),
    })
}

// --- Route Table ---

#[test]
fn test_pattern_captures_params() {
    let pattern = RoutePattern::parse("/faculty/groups/{id}");

    let params = pattern.matches("/faculty/groups/42").unwrap();
    assert_eq!(params.get("id").map(String::as_str), Some("42"));

    assert!(pattern.matches("/faculty/groups").is_none());
    assert!(pattern.matches("/faculty/groups/42/extra").is_none());
    assert!(pattern.matches("/student/groups/42").is_none());
}

#[test]
fn test_pattern_ignores_query_fragment_and_trailing_slash() {
    let pattern = RoutePattern::parse("/student/tasks");

    assert!(pattern.matches("/student/tasks/").is_some());
    assert!(pattern.matches("/student/tasks?due=week").is_some());
    assert!(pattern.matches("/student/tasks#top").is_some());
}

#[test]
fn test_root_pattern_only_matches_root() {
    let pattern = RoutePattern::parse("/");

    assert!(pattern.matches("/").is_some());
    assert!(pattern.matches("/login").is_none());
}

#[test]
fn test_portal_routes_access_levels() {
    let table = portal_routes();

    let cases = [
        ("/", Access::Public),
        ("/login", Access::Public),
        ("/register", Access::Public),
        ("/admin/users", Access::Gated(Role::Admin)),
        ("/faculty/groups/7", Access::Gated(Role::Faculty)),
        ("/faculty/evaluations", Access::Gated(Role::Faculty)),
        ("/student/submissions", Access::Gated(Role::Student)),
    ];

    for (path, access) in cases {
        let matched = table.resolve(path).unwrap_or_else(|| panic!("{path} should resolve"));
        assert_eq!(matched.access, access, "access for {path}");
    }

    assert!(table.resolve("/lecturer/dashboard").is_none());
}

#[test]
fn test_every_role_home_route_is_gated_on_that_role() {
    let table = portal_routes();

    for role in Role::ALL {
        let matched = table.resolve(role.home_route()).unwrap();
        assert_eq!(matched.access, Access::Gated(role));
    }
}

// --- Navigator ---

#[tokio::test]
async fn test_public_route_renders_without_probe() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, SessionStore::in_memory());

    assert_eq!(portal.navigator.navigate("/").await, rendered(View::Landing));
    assert_eq!(portal.navigator.navigate("/login").await, rendered(View::Login));
    assert_eq!(backend.probe_hits(), 0);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, logged_in(ADMIN_TOKEN, Role::Admin));

    assert_eq!(
        portal.navigator.navigate("/admin/secret").await,
        Navigation::NotFound
    );
    assert_eq!(backend.probe_hits(), 0);
}

#[tokio::test]
async fn test_gated_route_renders_with_params() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, logged_in(FACULTY_TOKEN, Role::Faculty));

    let nav = portal.navigator.navigate("/faculty/groups/17").await;

    let mut params = BTreeMap::new();
    params.insert("id".to_string(), "17".to_string());
    assert_eq!(
        nav,
        Navigation::Render(RenderedView {
            view: View::FacultyGroupDetail,
            params,
        })
    );
    assert_eq!(backend.probe_hits(), 1);
}

#[tokio::test]
async fn test_student_cannot_open_faculty_views() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, logged_in(STUDENT_TOKEN, Role::Student));

    assert_eq!(
        portal.navigator.navigate("/faculty/evaluations").await,
        Navigation::Redirect("/".to_string())
    );
}

#[tokio::test]
async fn test_anonymous_navigation_to_student_view_redirects_without_probe() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, SessionStore::in_memory());

    assert_eq!(
        portal.navigator.navigate("/student/dashboard").await,
        Navigation::Redirect("/".to_string())
    );
    assert_eq!(backend.probe_hits(), 0);
}

#[tokio::test]
async fn test_admin_navigates_own_section() {
    let backend = spawn_backend().await;
    let portal = portal(&backend.base_url, logged_in(ADMIN_TOKEN, Role::Admin));

    assert_eq!(
        portal.navigator.navigate("/admin/dashboard").await,
        rendered(View::AdminDashboard)
    );
    assert_eq!(
        portal.navigator.navigate("/admin/groups").await,
        rendered(View::AdminGroups)
    );
    assert_eq!(backend.probe_hits(), 2);
}
