use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// --- Module Structure ---

// Core client services and components.
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod session;
pub mod storage;

// Client-side route table, split by audience (public, admin, faculty, student).
pub mod routes;

// --- Public Re-exports ---

pub use api::{ApiState, HttpPortalApi, PortalApi};
pub use auth::{AuthService, LoginOutcome};
pub use config::{AppConfig, Env};
pub use error::{PortalError, PortalResult};
pub use gate::{Denial, GateOutcome, LANDING_ROUTE, RouteGate};
pub use models::{AuthorizationResult, Role, Session};
pub use routes::{Navigation, Navigator, RenderedView, View, portal_routes};
pub use session::SessionStore;
pub use storage::{FileStorage, MemoryStorage, PersistentStorage, StorageState};

/// Portal
///
/// The single container wiring the client together: one session store and
/// one backend client, shared by the auth service, the gate and the
/// navigator. Everything is injected here; nothing reads global state.
#[derive(Clone)]
pub struct Portal {
    pub config: AppConfig,
    pub auth: AuthService,
    pub gate: RouteGate,
    pub navigator: Navigator,
}

impl Portal {
    /// from_config
    ///
    /// Production wiring: file-backed session and the HTTP backend client.
    pub fn from_config(config: AppConfig) -> PortalResult<Self> {
        let session = SessionStore::file(config.session_file.clone());
        let api = Arc::new(HttpPortalApi::new(
            &config.api_base_url,
            config.request_timeout,
        )?) as ApiState;
        Ok(Self::with_parts(config, session, api))
    }

    /// with_parts
    ///
    /// Wiring from explicit collaborators, used by tests and embedders.
    pub fn with_parts(config: AppConfig, session: SessionStore, api: ApiState) -> Self {
        let gate = RouteGate::new(session.clone(), api.clone());
        Self {
            auth: AuthService::new(session, api),
            navigator: Navigator::new(portal_routes(), gate.clone()),
            gate,
            config,
        }
    }
}

/// init_tracing
///
/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
/// crate logs at debug. Local runs get pretty output, production gets JSON
/// for log aggregation. Logs go to stderr so command output stays clean.
pub fn init_tracing(env: &Env) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fyp_portal_client=debug,reqwest=info".into());

    match env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
