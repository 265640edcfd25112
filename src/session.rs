use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    error::PortalResult,
    models::{Role, Session},
    storage::{FileStorage, MemoryStorage, StorageState},
};

const TOKEN_KEY: &str = "token";
const ROLE_KEY: &str = "role";
const ISSUED_AT_KEY: &str = "issued_at";

/// SessionStore
///
/// Owns the session lifecycle on top of persisted storage:
/// `init` at login, `read`/`token` on every gate evaluation, `teardown` at
/// logout or on a rejected authorization probe.
///
/// Cheap to clone; clones share the same underlying storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: StorageState,
}

impl SessionStore {
    pub fn new(storage: StorageState) -> Self {
        Self { storage }
    }

    /// A store persisted to a JSON file.
    pub fn file(path: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStorage::new(path)))
    }

    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// init
    ///
    /// Persists a freshly issued session, replacing whatever was there.
    /// All-or-nothing: if any write fails, every session key is removed so no
    /// token is left behind without its role.
    pub fn init(&self, session: &Session) -> PortalResult<()> {
        if let Err(e) = self.write(session) {
            if let Err(cleanup) = self.teardown() {
                warn!(error = %cleanup, "failed to clear partially written session");
            }
            return Err(e);
        }
        debug!(role = %session.role, "session initialised");
        Ok(())
    }

    fn write(&self, session: &Session) -> PortalResult<()> {
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage.set_item(ROLE_KEY, session.role.as_str())?;
        self.storage
            .set_item(ISSUED_AT_KEY, &session.issued_at.to_rfc3339())
    }

    /// token
    ///
    /// The persisted bearer token, if any. This is all the gate needs.
    pub fn token(&self) -> PortalResult<Option<String>> {
        Ok(self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    /// read
    ///
    /// The full persisted session. Returns `None` when the token or the role
    /// is missing, or when the stored role is not one this client knows.
    pub fn read(&self) -> PortalResult<Option<Session>> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let Some(role_raw) = self.storage.get_item(ROLE_KEY)? else {
            return Ok(None);
        };
        let role = match role_raw.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, "ignoring persisted session with unrecognised role");
                return Ok(None);
            }
        };

        let issued_at = self
            .storage
            .get_item(ISSUED_AT_KEY)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        Ok(Some(Session {
            token,
            role,
            issued_at,
        }))
    }

    /// teardown
    ///
    /// Removes every session key. Safe to call when nothing is stored.
    pub fn teardown(&self) -> PortalResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(ROLE_KEY)?;
        self.storage.remove_item(ISSUED_AT_KEY)?;
        debug!("session cleared");
        Ok(())
    }
}
