use super::{RouteTable, View};
use crate::models::Role;

/// Admin Routes
///
/// Oversight of accounts and project groups. Every route here is gated on
/// `Role::Admin`, which the gate confirms against `/admin/dashboard`.
pub fn admin_routes() -> RouteTable {
    RouteTable::scoped(Role::Admin)
        .route("/admin/dashboard", View::AdminDashboard)
        // User management: create faculty/student accounts, change roles.
        .route("/admin/users", View::AdminUsers)
        // Every project group in the system with its supervisor.
        .route("/admin/groups", View::AdminGroups)
}
