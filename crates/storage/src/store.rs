//! Key/value store implementations.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use anyhow::Context;

/// Key/value store abstraction (string keys, serialized string values).
///
/// Reads and writes are synchronous; there is no cross-process locking, so
/// concurrent writers to the same key resolve as last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {path:?} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Which store a persisted value lives in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StorageScope {
    /// Durable across restarts.
    #[default]
    Local,
    /// Lives as long as the process.
    Session,
}

impl StorageScope {
    pub fn from_session_only(session_only: bool) -> Self {
        if session_only {
            StorageScope::Session
        } else {
            StorageScope::Local
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory store. Cheap to clone; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File store
// ─────────────────────────────────────────────────────────────────────────────

/// Durable store backed by a single JSON object file.
///
/// Every operation re-reads the file so that writes from another process are
/// picked up; writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Open the store at the default location (see [`default_storage_path`]).
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(default_storage_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Entries to rewrite. A corrupt file is moved aside to
    /// `storage.json.corrupt` and writing starts from an empty map.
    fn read_for_write(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.read_all() {
            Err(StoreError::Corrupt { path, message }) => {
                let aside = path.with_extension("json.corrupt");
                tracing::warn!(
                    path = %path.display(),
                    aside = %aside.display(),
                    "local storage is corrupt, starting fresh: {message}"
                );
                std::fs::rename(&path, &aside).map_err(|source| StoreError::Io { path, source })?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let payload = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, payload).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_for_write()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)
    }
}

/// Resolve the path of the durable store:
/// `$LEDGERDESK_DATA_DIR/storage.json`, else `{app_data_dir}/ledgerdesk/storage.json`.
pub fn default_storage_path() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var("LEDGERDESK_DATA_DIR") {
        let mut path = PathBuf::from(dir);
        path.push("storage.json");
        return Ok(path);
    }

    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|mut h| {
            h.push(".local");
            h.push("share");
            h
        }))
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("ledgerdesk");

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create storage directory at {:?}", dir))?;

    dir.push("storage.json");
    Ok(dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Scoped storage
// ─────────────────────────────────────────────────────────────────────────────

/// One store per scope. Cheap to clone.
#[derive(Clone)]
pub struct Storage {
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(local: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Both scopes in memory (tests, ephemeral shells).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    /// Durable local scope at the default path, in-memory session scope.
    pub fn open_default() -> anyhow::Result<Self> {
        let local = FileStore::open_default()?;
        tracing::debug!(path = %local.path().display(), "opened local storage");
        Ok(Self::new(Arc::new(local), Arc::new(MemoryStore::new())))
    }

    pub fn scope(&self, scope: StorageScope) -> &Arc<dyn KeyValueStore> {
        match scope {
            StorageScope::Local => &self.local,
            StorageScope::Session => &self.session,
        }
    }

    pub fn local(&self) -> &Arc<dyn KeyValueStore> {
        &self.local
    }

    pub fn session(&self) -> &Arc<dyn KeyValueStore> {
        &self.session
    }
}

impl core::fmt::Debug for Storage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("ledgerdesk-store-{}", uuid::Uuid::now_v7()));
        path.push("storage.json");
        path
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "\"v\"").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("\"v\""));
        assert!(store.contains("k").unwrap());

        store.remove("k").unwrap();
        assert!(!store.contains("k").unwrap());
        // Removing again is fine.
        store.remove("k").unwrap();
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("shared", "1").unwrap();
        assert_eq!(b.get("shared").unwrap().as_deref(), Some("1"));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path();
        let store = FileStore::new(&path);
        assert_eq!(store.get("token").unwrap(), None);

        store.set("token", "\"abc\"").unwrap();
        store.set("draft", "{}").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("\"abc\""));

        reopened.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        assert!(store.contains("draft").unwrap());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StoreError::Corrupt { .. })));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn writing_over_a_corrupt_file_moves_it_aside() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{trunc").unwrap();

        let store = FileStore::new(&path);
        store.set("token", "\"fresh\"").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token").unwrap().as_deref(), Some("\"fresh\""));
        let aside = path.with_extension("json.corrupt");
        assert_eq!(std::fs::read_to_string(&aside).unwrap(), "{trunc");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn scopes_are_isolated() {
        let storage = Storage::in_memory();
        storage.scope(StorageScope::Local).set("k", "1").unwrap();
        assert!(!storage.scope(StorageScope::Session).contains("k").unwrap());
        assert_eq!(StorageScope::from_session_only(true), StorageScope::Session);
    }
}
