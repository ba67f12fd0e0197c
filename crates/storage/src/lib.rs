//! `ledgerdesk-storage`: client-side key/value persistence.
//!
//! This crate provides:
//! - `KeyValueStore` with a process-lifetime (`MemoryStore`) and a durable
//!   (`FileStore`) implementation
//! - `Storage`, one store per `StorageScope`
//! - `PersistedState`, a value mirrored into a store across restarts

pub mod persist;
pub mod store;

pub use persist::PersistedState;
pub use store::{FileStore, KeyValueStore, MemoryStore, Storage, StorageScope, StoreError};
