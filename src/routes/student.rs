use super::{RouteTable, View};
use crate::models::Role;

/// Student Routes
///
/// A student's own group, the tasks assigned to it and the files submitted
/// against them. Gated on `Role::Student`.
pub fn student_routes() -> RouteTable {
    RouteTable::scoped(Role::Student)
        .route("/student/dashboard", View::StudentDashboard)
        .route("/student/group", View::StudentGroup)
        .route("/student/tasks", View::StudentTasks)
        // A single task with its upload form.
        .route("/student/tasks/{id}", View::StudentTaskDetail)
        .route("/student/submissions", View::StudentSubmissions)
}
