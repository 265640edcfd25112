//! Client-Side Route Table
//!
//! Maps URL paths to the portal's views and records, per route, whether the
//! view is public or scoped to a role. Role-scoped routes are only ever
//! rendered through the `RouteGate`.
//!
//! The sections mirror the portal's audiences, each declared in its own module.
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::{
    gate::{GateOutcome, RouteGate},
    models::Role,
};

/// Landing, login and registration. Never gated.
pub mod public;

/// Administrator views.
pub mod admin;

/// Faculty views: supervised groups and evaluations.
pub mod faculty;

/// Student views: own group, tasks and submissions.
pub mod student;

/// View
///
/// Every screen the portal can show. Rendering itself belongs to the front end;
/// the client only decides which view, if any, a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Landing,
    Login,
    Register,
    AdminDashboard,
    AdminUsers,
    AdminGroups,
    FacultyDashboard,
    FacultyGroups,
    FacultyGroupDetail,
    FacultyEvaluations,
    StudentDashboard,
    StudentGroup,
    StudentTasks,
    StudentTaskDetail,
    StudentSubmissions,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Login => "login",
            View::Register => "register",
            View::AdminDashboard => "admin-dashboard",
            View::AdminUsers => "admin-users",
            View::AdminGroups => "admin-groups",
            View::FacultyDashboard => "faculty-dashboard",
            View::FacultyGroups => "faculty-groups",
            View::FacultyGroupDetail => "faculty-group-detail",
            View::FacultyEvaluations => "faculty-evaluations",
            View::StudentDashboard => "student-dashboard",
            View::StudentGroup => "student-group",
            View::StudentTasks => "student-tasks",
            View::StudentTaskDetail => "student-task-detail",
            View::StudentSubmissions => "student-submissions",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Access
///
/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Gated(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// RoutePattern
///
/// A `/`-separated path pattern. A segment written as `{name}` matches any
/// single non-empty path segment and captures it under `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Self {
        let segments = split_path(raw)
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the captured parameters when `path` matches.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

/// Splits a path into its non-empty segments, ignoring any query or fragment.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|segment| !segment.is_empty())
}

/// RouteEntry
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: RoutePattern,
    pub view: View,
    pub access: Access,
}

/// RouteMatch
///
/// A resolved path: the entry it hit and the parameters it captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub view: View,
    pub access: Access,
    pub params: BTreeMap<String, String>,
}

/// RouteTable
///
/// An ordered list of routes sharing a default access level. Tables built for
/// each audience are combined with `merge`; lookups take the first match.
#[derive(Debug, Clone)]
pub struct RouteTable {
    access: Access,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// A table whose routes need no session.
    pub fn public() -> Self {
        Self {
            access: Access::Public,
            entries: Vec::new(),
        }
    }

    /// A table whose routes are all gated on `role`.
    pub fn scoped(role: Role) -> Self {
        Self {
            access: Access::Gated(role),
            entries: Vec::new(),
        }
    }

    /// Adds a route with this table's access level.
    pub fn route(mut self, pattern: &str, view: View) -> Self {
        self.entries.push(RouteEntry {
            pattern: RoutePattern::parse(pattern),
            view,
            access: self.access,
        });
        self
    }

    /// Appends `other`'s routes, keeping their own access levels.
    pub fn merge(mut self, other: RouteTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.entries.iter().find_map(|entry| {
            entry.pattern.matches(path).map(|params| RouteMatch {
                view: entry.view,
                access: entry.access,
                params,
            })
        })
    }
}

/// portal_routes
///
/// The complete route table of the portal.
pub fn portal_routes() -> RouteTable {
    public::public_routes()
        .merge(admin::admin_routes())
        .merge(faculty::faculty_routes())
        .merge(student::student_routes())
}

/// RenderedView
///
/// A view cleared for display along with the path parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub view: View,
    pub params: BTreeMap<String, String>,
}

/// Navigation
///
/// The result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(RenderedView),
    Redirect(String),
    NotFound,
}

/// Navigator
///
/// Resolves paths against the route table and sends every role-scoped match
/// through the gate. Each call to `navigate` is an independent evaluation.
#[derive(Clone)]
pub struct Navigator {
    table: RouteTable,
    gate: RouteGate,
}

impl Navigator {
    pub fn new(table: RouteTable, gate: RouteGate) -> Self {
        Self { table, gate }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub async fn navigate(&self, path: &str) -> Navigation {
        let Some(RouteMatch {
            view,
            access,
            params,
        }) = self.table.resolve(path)
        else {
            debug!(path, "no route matched");
            return Navigation::NotFound;
        };

        let rendered = RenderedView { view, params };
        match access {
            Access::Public => Navigation::Render(rendered),
            Access::Gated(role) => match self.gate.guard(role, rendered).await {
                GateOutcome::Render(rendered) => Navigation::Render(rendered),
                GateOutcome::Redirect(to) => Navigation::Redirect(to.to_string()),
            },
        }
    }
}
