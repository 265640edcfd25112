use tracing::info;

use crate::{
    api::ApiState,
    error::PortalResult,
    models::{LoginRequest, Role, Session},
    session::SessionStore,
};

/// LoginOutcome
///
/// The session a successful login persisted, plus where the client should
/// navigate next.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub session: Session,
    pub home_route: &'static str,
}

/// AuthService
///
/// Drives the session lifecycle against the backend: login creates the
/// session, logout destroys it. The gate only ever reads what this writes.
#[derive(Clone)]
pub struct AuthService {
    session: SessionStore,
    api: ApiState,
}

impl AuthService {
    pub fn new(session: SessionStore, api: ApiState) -> Self {
        Self { session, api }
    }

    /// login
    ///
    /// Posts the credentials, validates the returned role and persists the
    /// session. Nothing is written when the backend refuses the credentials or
    /// reports a role this client does not know.
    pub async fn login(&self, email: &str, password: &str) -> PortalResult<LoginOutcome> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.api.login(&credentials).await?;
        let role: Role = response.user.role.parse()?;

        let session = Session::new(response.token, role);
        self.session.init(&session)?;

        info!(%role, "logged in");
        Ok(LoginOutcome {
            session,
            home_route: role.home_route(),
        })
    }

    /// logout
    pub fn logout(&self) -> PortalResult<()> {
        self.session.teardown()?;
        info!("logged out");
        Ok(())
    }

    /// current
    ///
    /// The persisted session, if any. Does not contact the backend.
    pub fn current(&self) -> PortalResult<Option<Session>> {
        self.session.read()
    }
}
