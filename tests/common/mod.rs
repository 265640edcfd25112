#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fyp_portal_client::{ApiState, AppConfig, HttpPortalApi, Portal, SessionStore};
use serde_json::{Value, json};
use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::net::TcpListener;
use uuid::Uuid;

// --- Mock Backend ---

pub const ADMIN_TOKEN: &str = "admin-token";
pub const FACULTY_TOKEN: &str = "faculty-token";
pub const STUDENT_TOKEN: &str = "student-token";
pub const PASSWORD: &str = "correct-horse";

#[derive(Clone, Default)]
struct BackendState {
    probe_hits: Arc<AtomicUsize>,
    login_hits: Arc<AtomicUsize>,
    last_request_id: Arc<Mutex<Option<String>>>,
    delay: Option<Duration>,
}

/// A running in-process backend with the portal's login and dashboard
/// endpoints. Counters let tests assert how many requests the client made.
pub struct MockBackend {
    pub base_url: String,
    probe_hits: Arc<AtomicUsize>,
    login_hits: Arc<AtomicUsize>,
    last_request_id: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    pub fn probe_hits(&self) -> usize {
        self.probe_hits.load(Ordering::SeqCst)
    }

    pub fn login_hits(&self) -> usize {
        self.login_hits.load(Ordering::SeqCst)
    }

    pub fn last_request_id(&self) -> Option<String> {
        self.last_request_id.lock().unwrap().clone()
    }
}

fn role_for_token(token: &str) -> Option<&'static str> {
    match token {
        ADMIN_TOKEN => Some("admin"),
        FACULTY_TOKEN => Some("faculty"),
        STUDENT_TOKEN => Some("student"),
        _ => None,
    }
}

fn bad_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "bad credentials" })),
    )
        .into_response()
}

async fn login(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    record_request_id(&state, &headers);

    if body["password"] != PASSWORD {
        return bad_credentials();
    }

    let (token, role) = match body["email"].as_str() {
        Some("admin@portal.test") => (ADMIN_TOKEN, "admin"),
        Some("faculty@portal.test") => (FACULTY_TOKEN, "faculty"),
        Some("student@portal.test") => (STUDENT_TOKEN, "student"),
        // A role the client has never heard of.
        Some("guest@portal.test") => ("guest-token", "guest"),
        _ => return bad_credentials(),
    };

    Json(json!({
        "token": token,
        "user": { "id": 7, "name": "Test User", "email": body["email"], "role": role }
    }))
    .into_response()
}

async fn dashboard(
    State(state): State<BackendState>,
    Path(role): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    state.probe_hits.fetch_add(1, Ordering::SeqCst);
    record_request_id(&state, &headers);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token.and_then(role_for_token) {
        None => StatusCode::UNAUTHORIZED,
        Some(token_role) if token_role == role => StatusCode::OK,
        Some(_) => StatusCode::FORBIDDEN,
    }
}

fn record_request_id(state: &BackendState, headers: &HeaderMap) {
    let id = headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    *state.last_request_id.lock().unwrap() = id;
}

async fn spawn_with(delay: Option<Duration>) -> MockBackend {
    let state = BackendState {
        delay,
        ..BackendState::default()
    };
    let backend = MockBackend {
        base_url: String::new(),
        probe_hits: state.probe_hits.clone(),
        login_hits: state.login_hits.clone(),
        last_request_id: state.last_request_id.clone(),
    };

    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/{role}/dashboard", get(dashboard))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://127.0.0.1:{}/api", port),
        ..backend
    }
}

pub async fn spawn_backend() -> MockBackend {
    spawn_with(None).await
}

/// A backend whose dashboard endpoints answer only after `delay`.
pub async fn spawn_slow_backend(delay: Duration) -> MockBackend {
    spawn_with(Some(delay)).await
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

// --- Portal Wiring ---

pub fn http_api(base_url: &str, timeout: Duration) -> ApiState {
    Arc::new(HttpPortalApi::new(base_url, timeout).unwrap())
}

pub fn portal(base_url: &str, session: SessionStore) -> Portal {
    portal_with_timeout(base_url, session, Duration::from_secs(5))
}

pub fn portal_with_timeout(base_url: &str, session: SessionStore, timeout: Duration) -> Portal {
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        request_timeout: timeout,
        ..AppConfig::default()
    };
    Portal::with_parts(config, session, http_api(base_url, timeout))
}

/// A fresh, not-yet-existing session file path under the system temp dir.
pub fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join("fyp-portal-client-tests")
        .join(format!("session-{}.json", Uuid::new_v4()))
}
