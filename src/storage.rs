use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::PortalResult;

// 1. PersistentStorage Contract
/// PersistentStorage
///
/// A synchronous string key/value store that outlives the process, the same
/// shape as a browser's local storage. The session layer keeps `token`, `role`
/// and `issued_at` here as plain strings.
///
/// Implementations must be shareable across tasks; callers hold it as
/// `StorageState`.
pub trait PersistentStorage: Send + Sync {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> PortalResult<()>;
}

// 2. The Real Implementation (JSON file on disk)
/// FileStorage
///
/// Keeps every item in a single JSON object at `path`. Each operation reads
/// the whole document and, for writes, replaces it, so two handles on the
/// same file always observe each other's writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> PortalResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> PortalResult<()> {
        if items.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to a sibling file first so a crash never leaves half a document.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(items)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PersistentStorage for FileStorage {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

// 3. The Mock Implementation (For Tests)
/// MemoryStorage
///
/// In-memory `PersistentStorage` used by tests and by callers that do not want
/// anything written to disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
    /// When true, every operation returns a simulated I/O failure.
    pub should_fail: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn items(&self) -> PortalResult<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        if self.should_fail {
            return Err(io::Error::other("memory storage: simulated failure").into());
        }
        self.items
            .lock()
            .map_err(|_| io::Error::other("memory storage: lock poisoned").into())
    }
}

impl PersistentStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> PortalResult<()> {
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> PortalResult<()> {
        self.items()?.remove(key);
        Ok(())
    }
}

/// StorageState
///
/// The shared handle to whichever storage backs the session.
pub type StorageState = Arc<dyn PersistentStorage>;
