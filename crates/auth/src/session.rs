//! Session context: the bearer token shared by every client.
//!
//! A `Session` is built once at start-up from persisted storage and cloned
//! into each client; login and logout update it in place so every clone sees
//! the change. The token is mirrored into the local store under [`TOKEN_KEY`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use ledgerdesk_storage::{KeyValueStore, MemoryStore, Storage, StorageScope};

/// Storage key of the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Shared session context. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<SessionToken>>>,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Restore the session from the local scope of `storage`.
    pub fn restore(storage: &Storage) -> Self {
        Self::with_store(storage.scope(StorageScope::Local).clone())
    }

    /// Restore the session from an explicit store.
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => Some(SessionToken::new(raw)),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("failed to read persisted session token: {err}");
                None
            }
        };

        Self {
            token: Arc::new(RwLock::new(token)),
            store,
        }
    }

    /// A session with nothing persisted (tests, one-off tools).
    pub fn anonymous() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Install a freshly issued token and persist it.
    pub fn begin(&self, token: SessionToken) {
        if let Err(err) = self.store.set(TOKEN_KEY, token.as_str()) {
            tracing::warn!("failed to persist session token: {err}");
        }
        *self.write() = Some(token);
    }

    /// Forget the token, in memory and in storage.
    pub fn end(&self) {
        if let Err(err) = self.store.remove(TOKEN_KEY) {
            tracing::warn!("failed to remove persisted session token: {err}");
        }
        *self.write() = None;
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionToken>> {
        self.token.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionToken>> {
        self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
