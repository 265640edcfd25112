use async_trait::async_trait;
use reqwest::header::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    error::{PortalError, PortalResult},
    models::{LoginRequest, LoginResponse, Role},
};

/// Header used to correlate a client request with the backend's logs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// PortalApi
///
/// The client's view of the external backend: the login endpoint and the
/// per-role dashboard endpoints used as authorization probes. The auth service
/// and the gate depend on this trait, so tests can swap in an in-process fake.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Exchanges credentials for a bearer token and the user's role.
    /// A non-success status is `PortalError::LoginRejected`.
    async fn login(&self, credentials: &LoginRequest) -> PortalResult<LoginResponse>;

    /// Issues exactly one authenticated GET to `role`'s dashboard endpoint and
    /// returns the HTTP status. Transport failures (refused connection,
    /// timeout) are errors; every status, including 4xx/5xx, is `Ok`.
    async fn probe_dashboard(&self, role: Role, token: &str) -> PortalResult<u16>;
}

/// ApiState
///
/// The shared handle to the backend client.
pub type ApiState = Arc<dyn PortalApi>;

/// HttpPortalApi
///
/// `PortalApi` over HTTP with `reqwest`. One client is built up front and
/// reused for every call; the configured timeout covers the whole request.
#[derive(Clone)]
pub struct HttpPortalApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPortalApi {
    pub fn new(base_url: &str, timeout: Duration) -> PortalResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request_id() -> HeaderValue {
        // A hyphenated UUID is always a valid header value.
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginRequest) -> PortalResult<LoginResponse> {
        let response = self
            .client
            .post(self.endpoint("/auth/login"))
            .header(REQUEST_ID_HEADER, Self::request_id())
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "login rejected");
            return Err(PortalError::LoginRejected {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<LoginResponse>().await?)
    }

    #[instrument(skip(self, token))]
    async fn probe_dashboard(&self, role: Role, token: &str) -> PortalResult<u16> {
        let status = self
            .client
            .get(self.endpoint(role.dashboard_path()))
            .header(REQUEST_ID_HEADER, Self::request_id())
            .bearer_auth(token)
            .send()
            .await?
            .status()
            .as_u16();

        debug!(status, "authorization probe answered");
        Ok(status)
    }
}
