use std::env;
use std::path::PathBuf;
use std::time::Duration;

const LOCAL_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_SESSION_FILE: &str = ".portal-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// AppConfig
///
/// Holds the client's entire configuration. Immutable once loaded; every
/// service built from it (session store, backend client) takes what it needs
/// at construction.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the portal backend API. Endpoint paths are appended to it.
    pub api_base_url: String,
    // Where the persisted session (token, role) lives between runs.
    pub session_file: PathBuf,
    // Upper bound on any single backend request, including gate probes.
    pub request_timeout: Duration,
    // Runtime environment marker. Controls log format and fail-fast checks.
    pub env: Env,
}

/// Env
///
/// Local development against a backend on localhost, or a deployed backend.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking values for test setup, without touching the environment.
    fn default() -> Self {
        Self {
            api_base_url: LOCAL_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables (`.env` should be
    /// loaded by the caller first).
    ///
    /// # Panics
    /// Panics in production when `PORTAL_API_URL` is not set. A client pointed
    /// at a guessed backend must not start.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_base_url = match env {
            Env::Production => env::var("PORTAL_API_URL")
                .expect("FATAL: PORTAL_API_URL must be set in production."),
            Env::Local => env::var("PORTAL_API_URL").unwrap_or_else(|_| LOCAL_API_URL.to_string()),
        };

        let session_file = env::var("PORTAL_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        // An unparsable timeout falls back to the default rather than zero.
        let timeout_secs = env::var("PORTAL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base_url,
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
            env,
        }
    }
}
