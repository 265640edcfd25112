use super::{RouteTable, View};

/// Public Routes
///
/// The entry points reachable without a session. `/` is also where the gate
/// sends every denied navigation, so it must never be gated.
pub fn public_routes() -> RouteTable {
    RouteTable::public()
        // GET /
        // Landing page with the login/register calls to action.
        .route("/", View::Landing)
        .route("/login", View::Login)
        .route("/register", View::Register)
}
