//! Storage layer for persisting store snapshots
//!
//! The stores never talk to a database directly. They hand a serialized
//! snapshot to a key-value medium under a fixed record key and read it back
//! once at startup.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait defining the durable key-value medium
///
/// Values are opaque strings; the stores decide what goes in them. This
/// allows swapping SQLite for another medium (or an in-memory map in tests)
/// without touching the stores.
pub trait KeyValueStorage {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
