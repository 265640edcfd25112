use super::{RouteTable, View};
use crate::models::Role;

/// Faculty Routes
///
/// Supervision and evaluation. Gated on `Role::Faculty`.
pub fn faculty_routes() -> RouteTable {
    RouteTable::scoped(Role::Faculty)
        .route("/faculty/dashboard", View::FacultyDashboard)
        // Groups this faculty member supervises.
        .route("/faculty/groups", View::FacultyGroups)
        // One group: members, assigned tasks, progress.
        .route("/faculty/groups/{id}", View::FacultyGroupDetail)
        // Submissions waiting for a grade and feedback.
        .route("/faculty/evaluations", View::FacultyEvaluations)
}
