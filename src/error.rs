use thiserror::Error;

pub type PortalResult<T> = Result<T, PortalError>;

/// PortalError
///
/// Every failure the client library can report to its caller. Gate denials are
/// not errors; they are modelled by `gate::Denial` and collapse to a redirect.
#[derive(Error, Debug)]
pub enum PortalError {
    /// The persisted storage document could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The storage document or a response body was not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend could not be reached, timed out, or returned an unreadable body.
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered the login request with a non-success status.
    #[error("login rejected by backend with status {status}")]
    LoginRejected { status: u16 },

    /// A role string outside admin/faculty/student.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
