//! A value mirrored into a key/value store.
//!
//! `PersistedState` restores its value from the store when opened and writes
//! every change back, so form drafts and similar state survive a restart.
//! Store failures never surface to the caller: reads fall back to the initial
//! value and failed writes are logged.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{KeyValueStore, Storage, StorageScope};

/// A persisted value keyed by a caller-supplied string.
pub struct PersistedState<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    initial: T,
    value: T,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq,
{
    /// Open `key` in the given scope, restoring a stored value if one parses.
    pub fn open(storage: &Storage, key: impl Into<String>, initial: T, scope: StorageScope) -> Self {
        Self::with_store(storage.scope(scope).clone(), key, initial)
    }

    /// Open `key` directly on a store.
    pub fn with_store(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = restore(store.as_ref(), &key).unwrap_or_else(|| initial.clone());
        Self {
            store,
            key,
            initial,
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// Replace the value and mirror it into the store.
    ///
    /// The write is skipped while the value is still the initial one and the
    /// store has no entry yet, so opening and touching a field does not create
    /// an entry.
    pub fn set(&mut self, value: T) {
        self.value = value;

        if self.value == self.initial && !self.has_entry() {
            return;
        }

        match serde_json::to_string(&self.value) {
            Ok(raw) => {
                if let Err(err) = self.store.set(&self.key, &raw) {
                    tracing::warn!(key = %self.key, "failed to persist value: {err}");
                }
            }
            Err(err) => tracing::warn!(key = %self.key, "failed to serialize value: {err}"),
        }
    }

    /// Apply `f` to a copy of the value and persist the result.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next);
    }

    /// Drop the stored entry and go back to the initial value.
    pub fn reset(&mut self) {
        if let Err(err) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, "failed to remove persisted value: {err}");
        }
        self.value = self.initial.clone();
    }

    fn has_entry(&self) -> bool {
        self.store.contains(&self.key).unwrap_or(false)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for PersistedState<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PersistedState")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

fn restore<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(%key, "failed to read persisted value: {err}");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(%key, "ignoring unparsable persisted value: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, serde::Deserialize)]
    struct Draft {
        name: String,
        qty: u32,
    }

    fn shared_store() -> (MemoryStore, Arc<dyn KeyValueStore>) {
        let store = MemoryStore::new();
        let dyn_store: Arc<dyn KeyValueStore> = Arc::new(store.clone());
        (store, dyn_store)
    }

    #[test]
    fn starts_from_initial_when_nothing_is_stored() {
        let (_, store) = shared_store();
        let state = PersistedState::with_store(store, "draft", Draft::default());
        assert_eq!(state.value(), &Draft::default());
    }

    #[test]
    fn restores_a_stored_value() {
        let (raw, store) = shared_store();
        raw.set("draft", r#"{"name":"bolts","qty":4}"#).unwrap();

        let state = PersistedState::with_store(store, "draft", Draft::default());
        assert_eq!(state.value().name, "bolts");
        assert_eq!(state.value().qty, 4);
    }

    #[test]
    fn unparsable_value_falls_back_to_initial() {
        let (raw, store) = shared_store();
        raw.set("draft", "{broken").unwrap();

        let state = PersistedState::with_store(store, "draft", Draft::default());
        assert_eq!(state.value(), &Draft::default());
    }

    #[test]
    fn setting_the_untouched_initial_value_writes_nothing() {
        let (raw, store) = shared_store();
        let mut state = PersistedState::with_store(store, "draft", Draft::default());

        state.set(Draft::default());
        assert!(!raw.contains("draft").unwrap());
    }

    #[test]
    fn every_change_is_written() {
        let (raw, store) = shared_store();
        let mut state = PersistedState::with_store(store, "draft", Draft::default());

        state.update(|d| d.qty = 3);
        assert_eq!(raw.get("draft").unwrap().as_deref(), Some(r#"{"name":"","qty":3}"#));

        // Back to the initial value: the entry exists now, so it is overwritten.
        state.set(Draft::default());
        assert_eq!(raw.get("draft").unwrap().as_deref(), Some(r#"{"name":"","qty":0}"#));
    }

    #[test]
    fn reset_removes_the_entry_and_restores_initial() {
        let (raw, store) = shared_store();
        let initial = Draft {
            name: "default".into(),
            qty: 1,
        };
        let mut state = PersistedState::with_store(store.clone(), "draft", initial.clone());
        state.update(|d| d.qty = 9);
        assert!(raw.contains("draft").unwrap());

        state.reset();
        assert_eq!(state.value(), &initial);
        assert!(!raw.contains("draft").unwrap());

        let reopened = PersistedState::with_store(store, "draft", initial.clone());
        assert_eq!(reopened.value(), &initial);
    }

    #[test]
    fn session_scope_is_used_when_requested() {
        let storage = Storage::in_memory();
        let mut state = PersistedState::open(&storage, "filter", String::new(), StorageScope::Session);
        state.set("open".to_string());

        assert!(storage.session().contains("filter").unwrap());
        assert!(!storage.local().contains("filter").unwrap());
    }
}
