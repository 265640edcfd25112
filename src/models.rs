use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;

use crate::error::PortalError;

// --- Identity ---

/// Role
///
/// The three access tiers of the portal. Every role-scoped view and every
/// authorization probe is keyed by one of these.
///
/// The wire form is the lowercase name, exactly as the backend returns it in
/// the login response and as it is kept in persisted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

impl Role {
    /// All roles, in the order the route table lists their sections.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Faculty, Role::Student];

    /// as_str
    ///
    /// The persisted/wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Student => "student",
        }
    }

    /// dashboard_path
    ///
    /// The backend endpoint used as this role's "am I allowed here" probe.
    /// Relative to the configured API base URL.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Faculty => "/faculty/dashboard",
            Role::Student => "/student/dashboard",
        }
    }

    /// home_route
    ///
    /// The client-side route a freshly logged-in user of this role lands on.
    pub fn home_route(self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Faculty => "/faculty/dashboard",
            Role::Student => "/student/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            "student" => Ok(Role::Student),
            other => Err(PortalError::UnknownRole(other.to_string())),
        }
    }
}

/// Session
///
/// The client's proof of identity: the opaque bearer token handed out by the
/// backend at login, and the role the backend reported for that user.
///
/// Created on a successful login, persisted across restarts, and destroyed on
/// logout or when the backend rejects an authorization probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub token: String,
    pub role: Role,
    /// When the login that produced this session completed. Informational;
    /// nothing expires sessions client-side.
    #[ts(type = "string")]
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
            issued_at: Utc::now(),
        }
    }
}

/// AuthorizationResult
///
/// Outcome of one gate evaluation. Derived per navigation and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthorizationResult {
    pub authorized: bool,
}

// --- Login Contract ---

/// LoginRequest
///
/// Credentials posted to the backend login endpoint. The password is passed
/// through and never persisted or logged.
#[derive(Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// LoginUser
///
/// The `user` object of a login response. Only `role` is interpreted; any
/// other profile fields the backend sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginUser {
    /// Kept as the raw string so an unexpected role surfaces as a typed error
    /// from `Role::from_str` instead of a generic decode failure.
    pub role: String,
}

/// LoginResponse
///
/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}
