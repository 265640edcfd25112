use std::fmt;
use tracing::{info, warn};

use crate::{
    api::ApiState,
    models::{AuthorizationResult, Role},
    session::SessionStore,
};

/// The public entry point every denied navigation is sent back to.
pub const LANDING_ROUTE: &str = "/";

/// Denial
///
/// Why a gate evaluation did not authorize. Only ever logged; every variant
/// produces the same redirect for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No token in the session store. No request was made.
    MissingSession,
    /// The backend answered the probe with a non-200 status.
    Rejected { status: u16 },
    /// The probe never produced a status (connection refused, timeout, ...),
    /// or the session store itself could not be read.
    Unreachable { reason: String },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::MissingSession => f.write_str("no session token"),
            Denial::Rejected { status } => write!(f, "backend rejected probe with {status}"),
            Denial::Unreachable { reason } => write!(f, "probe failed: {reason}"),
        }
    }
}

/// GateOutcome
///
/// What the caller should do with the view it asked the gate to wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<V> {
    Render(V),
    Redirect(&'static str),
}

/// RouteGate
///
/// Guards role-scoped views. Each evaluation reads the session store and, if a
/// token is present, makes exactly one probe to the role's dashboard endpoint.
/// Nothing is cached between evaluations and nothing is retried.
#[derive(Clone)]
pub struct RouteGate {
    session: SessionStore,
    api: ApiState,
}

impl RouteGate {
    pub fn new(session: SessionStore, api: ApiState) -> Self {
        Self { session, api }
    }

    /// authorize
    ///
    /// Runs the check and reports the denial cause. A backend rejection also
    /// tears the session down; a transport failure leaves it in place so the
    /// next navigation can try again.
    pub async fn authorize(&self, required: Role) -> Result<(), Denial> {
        let token = match self.session.token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(Denial::MissingSession),
            Err(e) => {
                return Err(Denial::Unreachable {
                    reason: e.to_string(),
                });
            }
        };

        match self.api.probe_dashboard(required, &token).await {
            Ok(200) => Ok(()),
            Ok(status) => {
                if let Err(e) = self.session.teardown() {
                    warn!(error = %e, "failed to clear rejected session");
                }
                Err(Denial::Rejected { status })
            }
            Err(e) => Err(Denial::Unreachable {
                reason: e.to_string(),
            }),
        }
    }

    /// check
    ///
    /// The boolean view of `authorize`.
    pub async fn check(&self, required: Role) -> AuthorizationResult {
        AuthorizationResult {
            authorized: self.authorize(required).await.is_ok(),
        }
    }

    /// guard
    ///
    /// Wraps `view`: hands it back when authorized, otherwise redirects to the
    /// landing route. The denial cause is logged, never surfaced.
    pub async fn guard<V>(&self, required: Role, view: V) -> GateOutcome<V> {
        match self.authorize(required).await {
            Ok(()) => GateOutcome::Render(view),
            Err(denial) => {
                info!(role = %required, reason = %denial, "route gate denied, redirecting");
                GateOutcome::Redirect(LANDING_ROUTE)
            }
        }
    }
}
