//! Public library interface for the Habit Streak Tracker
//!
//! This module exports the server, the stores and the public types that
//! can be used by other applications or tests.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod store;
pub mod tools;

pub use domain::*;
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError};
pub use store::{Appearance, ColorScheme, HabitStore, Settings, SettingsStore};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main habit tracker server
///
/// Owns the habit store and the settings store. Both persist through the
/// same SQLite database.
pub struct HabitTrackerServer {
    habits: HabitStore<Arc<SqliteStorage>>,
    settings: SettingsStore<Arc<SqliteStorage>>,
}

impl HabitTrackerServer {
    /// Open (or create) the database at `db_path` and load both stores
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, ServerError> {
        tracing::info!(
            "Initializing Habit Streak Tracker with database: {:?}",
            db_path.as_ref()
        );

        let storage = Arc::new(SqliteStorage::new(db_path)?);
        Ok(Self::with_storage(storage))
    }

    /// Server backed by a throwaway in-memory database
    pub fn in_memory() -> Result<Self, ServerError> {
        Ok(Self::with_storage(Arc::new(SqliteStorage::in_memory()?)))
    }

    fn with_storage(storage: Arc<SqliteStorage>) -> Self {
        Self {
            habits: HabitStore::load(Arc::clone(&storage)),
            settings: SettingsStore::load(storage),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Server started, found {} existing habits",
            self.habits.total_habits()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    pub fn habits(&self) -> &HabitStore<Arc<SqliteStorage>> {
        &self.habits
    }

    pub fn habits_mut(&mut self) -> &mut HabitStore<Arc<SqliteStorage>> {
        &mut self.habits
    }

    pub fn settings(&self) -> &SettingsStore<Arc<SqliteStorage>> {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore<Arc<SqliteStorage>> {
        &mut self.settings
    }
}
